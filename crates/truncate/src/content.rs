use std::fmt;
use std::rc::Rc;

use markup::{Fragment, parse_fragment};

/// Produces projected content; evaluated again on every content check.
pub type TemplateFn = Rc<dyn Fn() -> Fragment>;

/// Content to truncate, before normalization into a [`Fragment`].
#[derive(Clone, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Literal text; markup characters are shown, not interpreted.
    Text(String),
    Number(f64),
    /// Inline markup, parsed leniently.
    Markup(String),
    Nodes(Fragment),
    Template(TemplateFn),
}

impl Content {
    pub fn markup(markup: impl Into<String>) -> Self {
        Content::Markup(markup.into())
    }

    pub fn template(f: impl Fn() -> Fragment + 'static) -> Self {
        Content::Template(Rc::new(f))
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Content::Template(_))
    }

    /// Canonical tree for this content.
    pub fn to_fragment(&self) -> Fragment {
        match self {
            Content::Empty => Fragment::default(),
            Content::Text(text) => Fragment::from_text(text.as_str()),
            Content::Number(n) => Fragment::from_text(format_number(*n)),
            Content::Markup(markup) => parse_fragment(markup),
            Content::Nodes(fragment) => fragment.clone(),
            Content::Template(f) => f(),
        }
    }
}

// Shortest representation that round-trips; integral values print without a
// fractional part (`0`, not `0.0`).
fn format_number(n: f64) -> String {
    format!("{n}")
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Empty => f.write_str("Empty"),
            Content::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Content::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Content::Markup(m) => f.debug_tuple("Markup").field(m).finish(),
            Content::Nodes(n) => f.debug_tuple("Nodes").field(&n.to_markup()).finish(),
            Content::Template(_) => f.write_str("Template(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<f64> for Content {
    fn from(n: f64) -> Self {
        Content::Number(n)
    }
}

// Integers render exactly; going through `f64` would round past 2^53.
impl From<i64> for Content {
    fn from(n: i64) -> Self {
        Content::Text(n.to_string())
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Content::Number(f64::from(n))
    }
}

impl From<Fragment> for Content {
    fn from(fragment: Fragment) -> Self {
        Content::Nodes(fragment)
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map_or(Content::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_plainly() {
        assert_eq!(Content::from(0i32).to_fragment().text_content(), "0");
        assert_eq!(Content::from(0.0).to_fragment().text_content(), "0");
        assert_eq!(
            Content::from(3.141592653589793).to_fragment().text_content(),
            "3.141592653589793"
        );
        assert_eq!(Content::from(-2.5).to_fragment().text_content(), "-2.5");
    }

    #[test]
    fn large_integers_render_exactly() {
        let n = (1i64 << 53) + 1;
        assert_eq!(Content::from(n).to_fragment().text_content(), "9007199254740993");
        assert_eq!(Content::from(i64::MIN).to_fragment().text_content(), "-9223372036854775808");
    }

    #[test]
    fn none_is_empty() {
        let content = Content::from(None::<&str>);
        assert!(content.to_fragment().is_empty());
    }

    #[test]
    fn text_is_not_interpreted() {
        let f = Content::from("<b>Lorem</b>").to_fragment();
        assert_eq!(f.text_content(), "<b>Lorem</b>");
        assert_eq!(f.children.len(), 1);
    }

    #[test]
    fn markup_is_parsed() {
        let f = Content::markup("<b>Lorem</b> ipsum").to_fragment();
        assert_eq!(f.text_content(), "Lorem ipsum");
        assert!(f.children[0].is_element());
    }

    #[test]
    fn templates_are_evaluated_on_every_call() {
        use std::cell::Cell;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let content = Content::template(move || {
            counter.set(counter.get() + 1);
            Fragment::from_text("x")
        });
        content.to_fragment();
        content.to_fragment();
        assert_eq!(calls.get(), 2);
        assert!(content.is_template());
    }
}
