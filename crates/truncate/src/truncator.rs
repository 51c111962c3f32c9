use markup::{Fragment, Node, TextLeaf, flatten};

use crate::state::{Indicator, TruncationState, WordBoundaries};

/// Where a tree was cut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cut {
    /// Chars of content text kept in front of the cut.
    pub retained: usize,
    /// Path of the cut leaf, as it was before the cut.
    pub leaf_path: Vec<usize>,
    /// False when the cut leaf lost all its text and was pruned.
    pub leaf_kept: bool,
}

/// Cut `tree` so that at most `target` chars of text remain.
///
/// `leaves` must be the flattening of this exact `tree`. The cut lands in
/// the leaf containing `target`, moved back to a word boundary when one is
/// configured. Everything after the cut leaf is removed; an emptied leaf is
/// removed together with every ancestor it leaves childless.
///
/// Returns `None` (tree untouched) when `target` is at or past the end of
/// the text.
pub fn truncate_at(
    tree: &mut Fragment,
    leaves: &[TextLeaf],
    target: usize,
    state: &TruncationState,
) -> Option<Cut> {
    let leaf = leaves.iter().rev().find(|l| l.contains(target))?;
    let Some(Node::Text { text }) = tree.node_at(&leaf.path) else {
        log::warn!(target: "truncate.search", "leaf {:?} is not a text node", leaf.path);
        return None;
    };

    let keep = cut_offset(text, target - leaf.start, &state.word_boundaries);
    let kept = state.substring.apply(text, 0, keep);
    let retained = leaf.start + tools::char_len(&kept);
    let path = leaf.path.clone();

    drop_following(tree, &path);

    let leaf_kept = !kept.is_empty();
    if leaf_kept {
        if let Some(Node::Text { text }) = tree.node_at_mut(&path) {
            *text = kept;
        }
    } else {
        prune_empty_leaf(tree, &path);
    }

    Some(Cut {
        retained,
        leaf_path: path,
        leaf_kept,
    })
}

/// In-leaf char offset to cut at for a requested offset `local`.
fn cut_offset(text: &str, local: usize, word_boundaries: &WordBoundaries) -> usize {
    if word_boundaries.is_any() {
        return local;
    }
    let chars: Vec<char> = text.chars().collect();
    if chars
        .get(local)
        .is_some_and(|&ch| word_boundaries.is_boundary(ch))
    {
        return local;
    }
    if local == 0 {
        return 0;
    }
    let mut i = (local - 1).min(chars.len().saturating_sub(1));
    while i > 0 && !word_boundaries.is_boundary(chars[i]) {
        i -= 1;
    }
    i
}

// Remove every node that follows `path` in document order.
fn drop_following(tree: &mut Fragment, path: &[usize]) {
    for depth in (1..=path.len()).rev() {
        if let Some(siblings) = tree.siblings_mut(&path[..depth]) {
            siblings.truncate(path[depth - 1] + 1);
        }
    }
}

// Remove the (last) node at `path`, then every ancestor left with nothing but
// comments.
fn prune_empty_leaf(tree: &mut Fragment, path: &[usize]) {
    let mut depth = path.len();
    while depth > 0 {
        let Some(siblings) = tree.siblings_mut(&path[..depth]) else {
            break;
        };
        siblings.truncate(path[depth - 1]);
        depth -= 1;

        let parent_empty = depth > 0
            && tree
                .node_at(&path[..depth])
                .and_then(Node::children)
                .is_some_and(|children| {
                    children.iter().all(|c| matches!(c, Node::Comment { .. }))
                });
        if !parent_empty {
            break;
        }
    }
}

/// Append `indicator` after a cut.
///
/// Text is concatenated onto the cut leaf. When that leaf was pruned, it goes
/// at the end of the deepest surviving ancestor. Rich indicators become the
/// last root-level node.
pub fn append_indicator(tree: &mut Fragment, cut: &Cut, indicator: &Indicator) {
    let text = match indicator {
        Indicator::Node(node) => {
            tree.children.push(node.clone());
            return;
        }
        Indicator::Text(text) => text,
    };

    if cut.leaf_kept {
        if let Some(Node::Text { text: leaf }) = tree.node_at_mut(&cut.leaf_path) {
            leaf.push_str(text);
            return;
        }
    }

    let ancestors = &cut.leaf_path[..cut.leaf_path.len().saturating_sub(1)];
    let depth = (1..=ancestors.len())
        .rev()
        .find(|&d| {
            tree.node_at(&ancestors[..d])
                .is_some_and(Node::is_element)
        })
        .unwrap_or(0);
    let container = if depth == 0 {
        Some(&mut tree.children)
    } else {
        tree.node_at_mut(&ancestors[..depth])
            .and_then(Node::children_mut)
    };
    let Some(container) = container else {
        return;
    };
    match container.last_mut() {
        Some(Node::Text { text: last }) => last.push_str(text),
        _ => container.push(Node::text(text.as_str())),
    }
}

/// Deep copy of `canonical` cut at `target` with the indicator appended.
///
/// A `target` at or past the end yields an unmodified copy and no cut.
pub fn truncated_copy(
    canonical: &Fragment,
    state: &TruncationState,
    target: usize,
) -> (Fragment, Option<Cut>) {
    let mut tree = canonical.clone();
    let leaves = flatten(&tree);
    let cut = truncate_at(&mut tree, &leaves, target, state);
    if let Some(cut) = &cut {
        append_indicator(&mut tree, cut, &state.indicator);
    }
    (tree, cut)
}
