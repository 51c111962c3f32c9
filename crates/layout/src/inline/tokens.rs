use markup::{Fragment, Node};

use crate::TextStyle;

use super::types::InlineContext;

// Internal token representation after whitespace processing.
// Token invariants:
// - `Space` is a single collapsible space and is never emitted consecutively.
// - Pending collapsible whitespace uses the first whitespace segment's style/ctx.
// - `HardBreak` resets whitespace state (pending space cleared; next content is line-start).
#[derive(Clone, Debug, PartialEq)]
pub(super) enum InlineToken {
    Word {
        text: String,
        style: TextStyle,
        ctx: InlineContext,
    },
    Space {
        style: TextStyle,
        ctx: InlineContext,
    },
    /// Force a new line (`<br>`, block boundaries).
    HardBreak,
}

#[derive(Clone)]
struct PendingSpace {
    style: TextStyle,
    ctx: InlineContext,
}

#[derive(Default)]
struct Collector {
    tokens: Vec<InlineToken>,
    pending_space: Option<PendingSpace>,
    has_emitted_content: bool,
}

// ASCII whitespace set used for HTML-like collapsing (excludes NBSP).
fn is_ascii_collapsible_html_ws(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t' | '\r' | '\u{0C}')
}

fn is_block_element(name: &str) -> bool {
    matches!(
        name,
        "div"
            | "p"
            | "li"
            | "ul"
            | "ol"
            | "blockquote"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

fn is_hidden_element(name: &str) -> bool {
    matches!(name, "script" | "style" | "head" | "template")
}

fn style_for_element(name: &str, parent: TextStyle) -> TextStyle {
    match name {
        "b" | "strong" => TextStyle {
            bold: true,
            ..parent
        },
        "i" | "em" => TextStyle {
            italic: true,
            ..parent
        },
        "small" => TextStyle {
            font_size: parent.font_size * 0.8,
            ..parent
        },
        "big" => TextStyle {
            font_size: parent.font_size * 1.2,
            ..parent
        },
        _ => parent,
    }
}

impl Collector {
    fn push_text(&mut self, text: &str, style: TextStyle, ctx: &InlineContext) {
        let mut current_word = String::new();

        for ch in text.chars() {
            if is_ascii_collapsible_html_ws(ch) {
                self.flush_word(&mut current_word, style, ctx);
                // Remember whitespace with its original style/context.
                if self.pending_space.is_none() {
                    self.pending_space = Some(PendingSpace {
                        style,
                        ctx: ctx.clone(),
                    });
                }
            } else {
                // Emit a single Space before this new word if needed.
                if current_word.is_empty() {
                    self.flush_pending_space();
                }
                current_word.push(ch);
            }
        }

        self.flush_word(&mut current_word, style, ctx);
    }

    fn flush_word(&mut self, word: &mut String, style: TextStyle, ctx: &InlineContext) {
        if word.is_empty() {
            return;
        }
        self.tokens.push(InlineToken::Word {
            text: std::mem::take(word),
            style,
            ctx: ctx.clone(),
        });
        self.has_emitted_content = true;
    }

    fn flush_pending_space(&mut self) {
        let Some(space) = self.pending_space.take() else {
            return;
        };
        if !self.has_emitted_content {
            self.pending_space = Some(space);
            return;
        }
        if matches!(
            self.tokens.last(),
            Some(InlineToken::Space { .. } | InlineToken::HardBreak)
        ) {
            return;
        }
        self.tokens.push(InlineToken::Space {
            style: space.style,
            ctx: space.ctx,
        });
    }

    fn hard_break(&mut self) {
        self.pending_space = None;
        self.tokens.push(InlineToken::HardBreak);
        self.has_emitted_content = false;
    }

    /// Block boundary: a line break, unless one is already pending.
    fn soft_break(&mut self) {
        match self.tokens.last() {
            None | Some(InlineToken::HardBreak) => self.pending_space = None,
            Some(_) => self.hard_break(),
        }
    }

    fn collect_node(&mut self, node: &Node, style: TextStyle, ctx: &InlineContext) {
        match node {
            Node::Text { text } => self.push_text(text, style, ctx),
            Node::Comment { .. } => {}
            Node::Element { name, children, .. } => {
                if is_hidden_element(name) {
                    return;
                }
                if name == "br" {
                    self.hard_break();
                    return;
                }
                let block = is_block_element(name);
                if block {
                    self.soft_break();
                }
                let style = style_for_element(name, style);
                let ctx = InlineContext {
                    tag: Some(name.clone()),
                    classes: node
                        .attr("class")
                        .map(|c| c.split_ascii_whitespace().map(str::to_string).collect())
                        .unwrap_or_default(),
                    enclosing_classes: ctx
                        .enclosing_classes
                        .iter()
                        .chain(&ctx.classes)
                        .cloned()
                        .collect(),
                };
                for child in children {
                    self.collect_node(child, style, &ctx);
                }
                if block {
                    self.soft_break();
                }
            }
        }
    }
}

pub(super) fn collect_inline_tokens(fragment: &Fragment, base: TextStyle) -> Vec<InlineToken> {
    let mut collector = Collector::default();
    let ctx = InlineContext::default();
    for node in &fragment.children {
        collector.collect_node(node, base, &ctx);
    }
    // Trailing collapsible whitespace and a final line break are not rendered.
    let mut tokens = collector.tokens;
    while matches!(
        tokens.last(),
        Some(InlineToken::HardBreak | InlineToken::Space { .. })
    ) {
        tokens.pop();
    }
    tokens
}
