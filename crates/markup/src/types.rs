pub type Attributes = Vec<(String, Option<String>)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Attributes,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

/// One node of a content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attributes: Attributes,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn element(name: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.into(),
            attributes,
            children,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    /// Number of chars of text in this subtree.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text { text } => tools::char_len(text),
            Node::Element { children, .. } => children.iter().map(Node::text_len).sum(),
            Node::Comment { .. } => 0,
        }
    }
}

/// Ordered list of root-level nodes. Cloning is a deep copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Fragment {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// A fragment holding a single text node (none for empty text).
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            children: vec![Node::Text { text }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of all text node lengths, in chars.
    pub fn text_len(&self) -> usize {
        self.children.iter().map(Node::text_len).sum()
    }

    /// Concatenated text data in document order.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text } => out.push_str(text),
                Node::Element { children, .. } => {
                    for c in children {
                        walk(c, out);
                    }
                }
                Node::Comment { .. } => {}
            }
        }
        let mut out = String::new();
        for c in &self.children {
            walk(c, &mut out);
        }
        out
    }

    /// Node addressed by a child-index path from the root list.
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for &idx in rest {
            node = node.children()?.get(idx)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &idx in rest {
            node = node.children_mut()?.get_mut(idx)?;
        }
        Some(node)
    }

    /// Child list that contains the node at `path` (the root list for depth 1).
    pub fn siblings_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        match path.split_last() {
            Some((_, [])) => Some(&mut self.children),
            Some((_, parent)) => self.node_at_mut(parent)?.children_mut(),
            None => None,
        }
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(children: Vec<Node>) -> Self {
        Self::new(children)
    }
}
