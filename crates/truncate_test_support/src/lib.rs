//! Helpers shared by the truncation integration tests and benches.

use core_types::{ContainerId, Size};
use layout::{FixedAdvanceMeasurer, LayoutSurface};
use markup::{Fragment, Node};

pub mod scenarios;

/// Width of one char at the default 16px font.
pub const ADVANCE: f32 = 8.0;

/// Line height at the default 16px font.
pub const LINE_HEIGHT: f32 = 20.0;

pub type TestSurface = LayoutSurface<FixedAdvanceMeasurer>;

/// Container `id` with a fixed-advance measurer: every char is
/// [`ADVANCE`] px wide, every line [`LINE_HEIGHT`] px tall.
pub fn surface_with_id(id: u64, width: f32, height: f32) -> TestSurface {
    LayoutSurface::new(
        ContainerId::from_raw(id),
        Size::new(width, height),
        FixedAdvanceMeasurer::new(ADVANCE),
    )
}

pub fn surface(width: f32, height: f32) -> TestSurface {
    surface_with_id(1, width, height)
}

/// Box that holds exactly `chars` chars on each of `lines` lines.
pub fn surface_for(chars: usize, lines: usize) -> TestSurface {
    surface(chars as f32 * ADVANCE, lines as f32 * LINE_HEIGHT)
}

/// `words` words of lorem ipsum, space separated.
pub fn lorem(words: usize) -> String {
    const WORDS: [&str; 12] = [
        "Lorem", "ipsum", "dolor", "sit", "amet,", "consetetur", "sadipscing", "elitr,", "sed",
        "diam", "nonumy", "eirmod",
    ];
    WORDS
        .iter()
        .cycle()
        .take(words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-void elements in `fragment` holding nothing but comments (or nothing
/// at all).
pub fn empty_elements(fragment: &Fragment) -> Vec<String> {
    fn walk(node: &Node, out: &mut Vec<String>) {
        if let Node::Element { name, children, .. } = node {
            let hollow = children.iter().all(|c| matches!(c, Node::Comment { .. }));
            if hollow && !matches!(name.as_str(), "br" | "img" | "hr" | "wbr") {
                out.push(name.clone());
            }
            for c in children {
                walk(c, out);
            }
        }
    }
    let mut out = Vec::new();
    for node in &fragment.children {
        walk(node, &mut out);
    }
    out
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    use std::fmt::Write;
    let missing = "<missing>";
    let mismatch = (0..max).find(|&i| expected.get(i) != actual.get(i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::Surface;

    #[test]
    fn lorem_cycles_words() {
        assert_eq!(lorem(3), "Lorem ipsum dolor");
        assert_eq!(lorem(13).split(' ').count(), 13);
    }

    #[test]
    fn surface_for_fits_exactly() {
        let mut s = surface_for(5, 1);
        s.render(&Fragment::from_text("Lorem"));
        assert_eq!(s.scroll_size(), s.client_size());
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["x".to_string(), "z".to_string()];
        assert!(diff_lines(&a, &b).contains("first mismatch at line 2"));
    }

    #[test]
    fn finds_empty_elements() {
        let f = markup::parse_fragment("<b></b>a<br><i>x<span></span></i>");
        assert_eq!(empty_elements(&f), vec!["b".to_string(), "span".to_string()]);
    }

    #[test]
    fn comment_only_elements_count_as_empty() {
        let f = markup::parse_fragment("Lorem <b><!--c--></b><i><!--c-->x</i>");
        assert_eq!(empty_elements(&f), vec!["b".to_string()]);
    }
}
