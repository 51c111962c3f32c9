use crate::{Rectangle, TextStyle};

/// Innermost element an inline run belongs to, used for hit-testing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineContext {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    /// Classes of every enclosing element, outermost first.
    pub enclosing_classes: Vec<String>,
}

// One run of text within a line (a word or a collapsed space).
#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment {
    pub text: String,
    pub style: TextStyle,
    pub ctx: InlineContext,
    pub rect: Rectangle,
}

impl LineFragment {
    pub fn is_space(&self) -> bool {
        self.text == " "
    }
}

// One line box: a horizontal slice of inline content.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    pub fragments: Vec<LineFragment>,
    pub rect: Rectangle,
}
