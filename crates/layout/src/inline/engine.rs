use markup::Fragment;

use crate::{Rectangle, TextMeasurer, TextStyle};

use super::breaker::break_word_prefix_end;
use super::options::InlineLayoutOptions;
use super::tokens::{InlineToken, collect_inline_tokens};
use super::types::{InlineContext, LineBox, LineFragment};

/// Lay out `fragment` as inline content inside a box `width` px wide.
///
/// Lines are placed top to bottom starting at the padding edge. A word that
/// does not fit moves to the next line unless it is the first thing on its
/// line, in which case it overflows (or is split when `break_long_words` is
/// set).
pub fn layout_fragment(
    measurer: &dyn TextMeasurer,
    fragment: &Fragment,
    base: &TextStyle,
    options: InlineLayoutOptions,
    width: f32,
) -> Vec<LineBox> {
    let tokens = collect_inline_tokens(fragment, *base);
    if tokens.is_empty() {
        return Vec::new();
    }
    layout_tokens(measurer, tokens, base, options, width)
}

struct LineBuilder<'m> {
    measurer: &'m dyn TextMeasurer,
    lines: Vec<LineBox>,
    fragments: Vec<LineFragment>,
    start_x: f32,
    cursor_x: f32,
    y: f32,
    strut: f32,
}

impl LineBuilder<'_> {
    fn has_content(&self) -> bool {
        self.fragments.iter().any(|f| !f.is_space())
    }

    fn push(&mut self, text: String, style: TextStyle, ctx: InlineContext, width: f32) {
        let height = self.measurer.line_height(&style);
        self.fragments.push(LineFragment {
            text,
            style,
            ctx,
            rect: Rectangle {
                x: self.cursor_x,
                y: self.y,
                width,
                height,
            },
        });
        self.cursor_x += width;
    }

    fn flush(&mut self, allow_empty_line: bool) {
        // Trailing collapsible spaces do not contribute to the line width.
        while self.fragments.last().is_some_and(LineFragment::is_space) {
            self.fragments.pop();
        }
        if self.fragments.is_empty() && !allow_empty_line {
            self.cursor_x = self.start_x;
            return;
        }

        let line_height = self
            .fragments
            .iter()
            .map(|f| f.rect.height)
            .fold(self.strut, f32::max);
        let end_x = self
            .fragments
            .last()
            .map_or(self.start_x, |f| f.rect.x + f.rect.width);

        // Bottom-align runs of different heights on the line.
        for frag in &mut self.fragments {
            frag.rect.y = self.y + (line_height - frag.rect.height);
        }

        self.lines.push(LineBox {
            fragments: std::mem::take(&mut self.fragments),
            rect: Rectangle {
                x: self.start_x,
                y: self.y,
                width: (end_x - self.start_x).max(0.0),
                height: line_height,
            },
        });
        self.y += line_height;
        self.cursor_x = self.start_x;
    }
}

fn layout_tokens(
    measurer: &dyn TextMeasurer,
    tokens: Vec<InlineToken>,
    base: &TextStyle,
    options: InlineLayoutOptions,
    width: f32,
) -> Vec<LineBox> {
    let padding = options.padding.max(0.0);
    let available = (width - 2.0 * padding).max(0.0);
    let end_x = padding + available;

    let mut line = LineBuilder {
        measurer,
        lines: Vec::new(),
        fragments: Vec::new(),
        start_x: padding,
        cursor_x: padding,
        y: padding,
        strut: measurer.line_height(base),
    };

    for token in tokens {
        match token {
            InlineToken::Space { style, ctx } => {
                // Spaces never start a line.
                if line.fragments.is_empty() {
                    continue;
                }
                let w = measurer.measure(" ", &style);
                line.push(" ".to_string(), style, ctx, w);
            }
            InlineToken::Word { text, style, ctx } => {
                let w = measurer.measure(&text, &style);
                if line.cursor_x + w > end_x && line.has_content() {
                    line.flush(false);
                }

                if !options.break_long_words || w <= available {
                    line.push(text, style, ctx, w);
                    continue;
                }

                let mut rest = text.as_str();
                while !rest.is_empty() {
                    let room = end_x - line.cursor_x;
                    let split = break_word_prefix_end(measurer, &style, rest, room);
                    let (head, tail) = rest.split_at(split);
                    let hw = measurer.measure(head, &style);
                    line.push(head.to_string(), style, ctx.clone(), hw);
                    rest = tail;
                    if !rest.is_empty() {
                        line.flush(false);
                    }
                }
            }
            InlineToken::HardBreak => line.flush(true),
        }
    }
    line.flush(false);

    line.lines
}
