/// Per-call configuration for the inline layout engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InlineLayoutOptions {
    /// Inner padding of the container on every side, in CSS px.
    pub padding: f32,
    /// Break unbreakable runs that are wider than the line (`overflow-wrap: anywhere`).
    pub break_long_words: bool,
}

impl InlineLayoutOptions {
    /// Plain inline layout: no padding, long words overflow horizontally.
    pub const fn html_defaults() -> Self {
        Self {
            padding: 0.0,
            break_long_words: false,
        }
    }
}

impl Default for InlineLayoutOptions {
    fn default() -> Self {
        Self::html_defaults()
    }
}
