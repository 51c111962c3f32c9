use core_types::ContainerId;
use markup::{Attributes, Fragment, Node};
use tools::Substring;

/// Indicator appended when content is truncated and nothing else is configured.
pub const DEFAULT_INDICATOR: &str = "...";

/// Class carried by the interactive ("more") indicator.
pub const MORE_CLASS: &str = "ellipsis-more";

/// Characters at which content may be cut.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WordBoundaries {
    /// Any character position is a valid cut point.
    #[default]
    Any,
    /// Only cut before one of these characters.
    Chars(Vec<char>),
}

impl WordBoundaries {
    /// Each char of `raw` is a boundary; the two-char escape `\n` means a
    /// newline. An empty set means [`WordBoundaries::Any`].
    pub fn parse(raw: &str) -> Self {
        let mut chars: Vec<char> = raw.replace("\\n", "\n").chars().collect();
        chars.sort_unstable();
        chars.dedup();
        if chars.is_empty() {
            WordBoundaries::Any
        } else {
            WordBoundaries::Chars(chars)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, WordBoundaries::Any)
    }

    pub fn is_boundary(&self, ch: char) -> bool {
        match self {
            WordBoundaries::Any => true,
            WordBoundaries::Chars(set) => set.binary_search(&ch).is_ok(),
        }
    }
}

/// What gets appended after truncated content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indicator {
    Text(String),
    Node(Node),
}

impl Default for Indicator {
    fn default() -> Self {
        Indicator::Text(DEFAULT_INDICATOR.to_string())
    }
}

impl Indicator {
    /// Text indicator; empty text falls back to [`DEFAULT_INDICATOR`].
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::default()
        } else {
            Indicator::Text(text)
        }
    }

    /// Rich indicator from parsed markup. Several root nodes are wrapped in a
    /// `span`; markup without any node falls back to the default text.
    pub fn from_fragment(fragment: Fragment) -> Self {
        let mut children = fragment.children;
        match children.len() {
            0 => Self::default(),
            1 => match children.pop() {
                Some(node) => Indicator::Node(node),
                None => Self::default(),
            },
            _ => Indicator::Node(Node::element("span", Vec::new(), children)),
        }
    }

    /// Form used while someone listens for "more" clicks: the indicator's
    /// root carries [`MORE_CLASS`]. Text and non-element nodes are wrapped in
    /// a link; a rich element gets the class added.
    pub fn interactive(self) -> Self {
        match self {
            Indicator::Text(text) => more_link(Node::text(text)),
            Indicator::Node(Node::Element {
                name,
                mut attributes,
                children,
            }) => {
                add_class(&mut attributes, MORE_CLASS);
                Indicator::Node(Node::Element {
                    name,
                    attributes,
                    children,
                })
            }
            Indicator::Node(node) => more_link(node),
        }
    }
}

fn more_link(child: Node) -> Indicator {
    Indicator::Node(Node::element(
        "a",
        vec![
            ("href".to_string(), Some("#".to_string())),
            ("class".to_string(), Some(MORE_CLASS.to_string())),
        ],
        vec![child],
    ))
}

fn add_class(attributes: &mut Attributes, class: &str) {
    match attributes.iter_mut().find(|(k, _)| k == "class") {
        Some((_, Some(value))) => {
            if !value.split_ascii_whitespace().any(|c| c == class) {
                if !value.trim().is_empty() {
                    value.push(' ');
                }
                value.push_str(class);
            }
        }
        Some((_, value)) => *value = Some(class.to_string()),
        None => attributes.push(("class".to_string(), Some(class.to_string()))),
    }
}

/// Per-content truncation parameters, rebuilt whenever the content or the
/// configuration changes.
#[derive(Clone, Debug)]
pub struct TruncationState {
    pub container: ContainerId,
    pub original_text_len: usize,
    pub word_boundaries: WordBoundaries,
    pub indicator: Indicator,
    pub substring: Substring,
}

impl TruncationState {
    pub fn new(container: ContainerId, content: &Fragment) -> Self {
        Self {
            container,
            original_text_len: content.text_len(),
            word_boundaries: WordBoundaries::Any,
            indicator: Indicator::default(),
            substring: Substring::default(),
        }
    }

    pub fn with_word_boundaries(mut self, word_boundaries: WordBoundaries) -> Self {
        self.word_boundaries = word_boundaries;
        self
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn with_substring(mut self, substring: Substring) -> Self {
        self.substring = substring;
        self
    }
}
