use crate::tokenizer::tokenize;
use crate::types::{Attributes, Fragment, Node, Token};

/// Deepest element nesting the builder will produce.
///
/// Start tags met while this many elements are already open are still added,
/// but as empty elements; what follows them stays in the deepest open element.
/// Every other tree walk in the workspace recurses, so this keeps parsed
/// fragments within a fixed stack budget however hostile the input.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Parse inline markup into a content fragment. Never fails: unmatched end tags
/// are ignored, unclosed elements are closed at end of input and nesting is
/// capped at [`MAX_NESTING_DEPTH`].
pub fn parse_fragment(input: &str) -> Fragment {
    build_fragment(&tokenize(input))
}

pub fn build_fragment(tokens: &[Token]) -> Fragment {
    let mut arena = NodeArena::new();
    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().copied().unwrap_or(ROOT);
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    arena.add_child(parent, ArenaNode::Text { text: text.clone() });
                }
            }
            Token::Comment(text) => {
                arena.add_child(parent, ArenaNode::Comment { text: text.clone() });
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let index = arena.add_child(
                    parent,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );
                if !*self_closing && open_elements.len() < MAX_NESTING_DEPTH {
                    open_elements.push(index);
                }
            }
            Token::EndTag(name) => {
                // Only close when the element is actually open; a stray end tag
                // must not unwind unrelated ancestors.
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|&idx| arena.is_element_named(idx, name))
                {
                    open_elements.truncate(pos);
                }
            }
        }
    }

    arena.into_fragment()
}

const ROOT: usize = 0;

#[derive(Debug)]
enum ArenaNode {
    Root {
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Attributes,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Root { children } | ArenaNode::Element { children, .. } => Some(children),
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::Root {
                children: Vec::new(),
            }],
        }
    }

    fn add_child(&mut self, parent: usize, child: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(child);
        match &mut self.nodes[parent] {
            ArenaNode::Root { children } | ArenaNode::Element { children, .. } => {
                children.push(index);
            }
            _ => unreachable!("only the root and elements are ever opened as parents"),
        }
        index
    }

    fn is_element_named(&self, index: usize, target: &str) -> bool {
        match &self.nodes[index] {
            ArenaNode::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    fn into_fragment(self) -> Fragment {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(n: usize, built: &mut Vec<Node>) -> Vec<Node> {
            let at = built.len() - n;
            built.split_off(at)
        }

        // Iterative postorder: when a node is seen the second time, its direct
        // children are the last `child_count` entries of `built`, in order.
        let mut stack: Vec<(usize, bool)> = vec![(ROOT, false)];
        let mut root_children = Vec::new();

        while let Some((index, visited)) = stack.pop() {
            if !visited {
                stack.push((index, true));
                if let Some(children) = nodes[index].children() {
                    for &child in children.iter().rev() {
                        stack.push((child, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[index] {
                ArenaNode::Root { children } => {
                    root_children = take_children(children.len(), &mut built);
                    continue;
                }
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => Node::Element {
                    name: std::mem::take(name),
                    attributes: std::mem::take(attributes),
                    children: take_children(children.len(), &mut built),
                },
                ArenaNode::Text { text } => Node::Text {
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    text: std::mem::take(text),
                },
            };
            built.push(node);
        }

        debug_assert!(built.is_empty(), "every node is owned by its parent");
        Fragment::new(root_children)
    }
}
