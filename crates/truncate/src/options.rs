use std::fs;
use std::path::Path;

use markup::parse_fragment;
use serde::{Deserialize, Serialize};
use tools::Substring;

use crate::error::OptionsError;
use crate::resize::ResizeStrategy;
use crate::state::{Indicator, WordBoundaries};

/// User-facing configuration. Every key is optional.
///
/// ```toml
/// indicator = " [more]"
/// word-boundaries = " \\n"
/// resize-detection = "window"
/// substring = "graphemes"
/// enabled = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EllipsisOptions {
    /// Text appended to truncated content; empty means `"..."`.
    pub indicator: Option<String>,
    /// Rich indicator given as inline markup; wins over `indicator`.
    pub indicator_markup: Option<String>,
    pub word_boundaries: Option<String>,
    pub resize_detection: Option<String>,
    /// `code-points` or `graphemes`.
    pub substring: Option<String>,
    pub enabled: bool,
}

impl Default for EllipsisOptions {
    fn default() -> Self {
        Self {
            indicator: None,
            indicator_markup: None,
            word_boundaries: None,
            resize_detection: None,
            substring: None,
            enabled: true,
        }
    }
}

impl EllipsisOptions {
    pub fn from_toml_str(input: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = Some(indicator.into());
        self
    }

    pub fn with_indicator_markup(mut self, markup: impl Into<String>) -> Self {
        self.indicator_markup = Some(markup.into());
        self
    }

    pub fn with_word_boundaries(mut self, boundaries: impl Into<String>) -> Self {
        self.word_boundaries = Some(boundaries.into());
        self
    }

    pub fn with_resize_detection(mut self, strategy: impl Into<String>) -> Self {
        self.resize_detection = Some(strategy.into());
        self
    }

    pub fn with_substring(mut self, substring: impl Into<String>) -> Self {
        self.substring = Some(substring.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn indicator(&self) -> Indicator {
        if let Some(markup) = self.indicator_markup.as_deref().filter(|m| !m.trim().is_empty()) {
            return Indicator::from_fragment(parse_fragment(markup));
        }
        Indicator::text(self.indicator.clone().unwrap_or_default())
    }

    pub fn word_boundaries(&self) -> WordBoundaries {
        WordBoundaries::parse(self.word_boundaries.as_deref().unwrap_or_default())
    }

    pub fn resize_strategy(&self) -> ResizeStrategy {
        ResizeStrategy::from_name_or_default(self.resize_detection.as_deref().unwrap_or_default())
    }

    pub fn substring(&self) -> Substring {
        match self.substring.as_deref().map(str::trim) {
            None | Some("") | Some("code-points") => Substring::CodePoints,
            Some("graphemes") => Substring::Graphemes,
            Some(other) => {
                log::warn!(
                    target: "truncate.options",
                    "no such substring strategy: `{other}`; using `code-points` instead"
                );
                Substring::CodePoints
            }
        }
    }
}
