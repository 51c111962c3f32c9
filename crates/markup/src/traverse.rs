use crate::types::{Fragment, Node};

/// One text node of a specific fragment, addressed by its child-index path,
/// with its `[start, end)` char range in the fragment's flattened text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLeaf {
    pub path: Vec<usize>,
    pub start: usize,
    pub end: usize,
}

impl TextLeaf {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Text leaves of `fragment` in render order (depth-first, left-to-right).
///
/// Paths index into this exact fragment; flatten again after any structural
/// change.
pub fn flatten(fragment: &Fragment) -> Vec<TextLeaf> {
    fn walk(node: &Node, path: &mut Vec<usize>, offset: &mut usize, out: &mut Vec<TextLeaf>) {
        match node {
            Node::Text { text } => {
                let start = *offset;
                *offset += tools::char_len(text);
                out.push(TextLeaf {
                    path: path.clone(),
                    start,
                    end: *offset,
                });
            }
            Node::Element { children, .. } => {
                for (i, c) in children.iter().enumerate() {
                    path.push(i);
                    walk(c, path, offset, out);
                    path.pop();
                }
            }
            Node::Comment { .. } => {}
        }
    }

    let mut out = Vec::new();
    let mut path = Vec::new();
    let mut offset = 0;
    for (i, c) in fragment.children.iter().enumerate() {
        path.push(i);
        walk(c, &mut path, &mut offset, &mut out);
        path.pop();
    }
    out
}
