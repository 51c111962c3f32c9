//! Character-safe substring helpers.
//!
//! Offsets and lengths are counted in Unicode scalar values (`char`s), never in
//! bytes, so a cut can never land inside a multi-byte UTF-8 sequence. The
//! grapheme variant additionally refuses to split extended grapheme clusters
//! (emoji with modifiers, combining marks, regional-indicator flags).

use std::fmt;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

/// Custom substring callback: `(text, start, len) -> substring`.
pub type SubstringFn = Rc<dyn Fn(&str, usize, usize) -> String>;

/// Number of `char`s in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`th char of `s`, clamped to `s.len()`.
pub fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(idx, _)| idx).unwrap_or(s.len())
}

/// Slice of at most `len` chars starting at char `start`.
pub fn char_substring(s: &str, start: usize, len: usize) -> &str {
    let from = byte_offset_of_char(s, start);
    let rest = &s[from..];
    let to = byte_offset_of_char(rest, len);
    &rest[..to]
}

/// Like [`char_substring`] but only whole grapheme clusters are kept.
///
/// A cluster straddling either end of the requested range is dropped, so the
/// result may be shorter than `len` chars.
pub fn grapheme_substring(s: &str, start: usize, len: usize) -> &str {
    let end = start.saturating_add(len);
    let mut chars_seen = 0usize;
    let mut from: Option<usize> = None;
    let mut to = 0usize;

    for (idx, g) in s.grapheme_indices(true) {
        let g_chars = char_len(g);
        let g_start = chars_seen;
        let g_end = chars_seen + g_chars;
        chars_seen = g_end;

        if g_start < start {
            continue;
        }
        if g_end > end {
            break;
        }
        if from.is_none() {
            from = Some(idx);
        }
        to = idx + g.len();
    }

    match from {
        Some(from) => &s[from..to],
        None => "",
    }
}

/// Pluggable substring strategy used when text nodes are cut.
#[derive(Clone, Default)]
pub enum Substring {
    /// Cut at any `char` boundary.
    #[default]
    CodePoints,
    /// Cut only between extended grapheme clusters.
    Graphemes,
    Custom(SubstringFn),
}

impl Substring {
    pub fn apply(&self, text: &str, start: usize, len: usize) -> String {
        match self {
            Substring::CodePoints => char_substring(text, start, len).to_string(),
            Substring::Graphemes => grapheme_substring(text, start, len).to_string(),
            Substring::Custom(f) => f(text, start, len),
        }
    }
}

impl fmt::Debug for Substring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substring::CodePoints => f.write_str("CodePoints"),
            Substring::Graphemes => f.write_str("Graphemes"),
            Substring::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
