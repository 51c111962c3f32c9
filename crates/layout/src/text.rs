/// Font-affecting style of an inline run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn initial() -> Self {
        Self {
            font_size: 16.0,
            bold: false,
            italic: false,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::initial()
    }
}

/// Layout can depend on this without knowing about any font backend.
pub trait TextMeasurer {
    /// Return the width of `text` in CSS px when rendered with `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> f32;

    /// Return the line-height in CSS px for the given `style`.
    fn line_height(&self, style: &TextStyle) -> f32;
}

/// Every char advances by the same width, scaled with the font size.
///
/// `advance` is the width of one char at 16px; bold runs are 10% wider.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasurer {
    pub advance: f32,
    pub line_height_factor: f32,
}

impl FixedAdvanceMeasurer {
    pub const fn new(advance: f32) -> Self {
        Self {
            advance,
            line_height_factor: 1.25,
        }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        let per_char = self.advance * style.font_size / 16.0;
        let per_char = if style.bold { per_char * 1.1 } else { per_char };
        text.chars().count() as f32 * per_char
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        style.font_size * self.line_height_factor
    }
}
