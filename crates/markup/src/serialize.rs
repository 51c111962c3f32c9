use std::fmt::Write;

use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::is_void_element;
use crate::types::{Fragment, Node};

/// Deterministic markup serialization.
///
/// Equal trees always serialize to equal strings, which is what content
/// snapshots rely on. Attribute order is preserved; text is escaped so the
/// output parses back into the same tree.
pub fn to_markup(fragment: &Fragment) -> String {
    let mut out = String::new();
    for node in &fragment.children {
        write_node(node, &mut out);
    }
    out
}

pub fn node_to_markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { text } => out.push_str(&escape_text(text)),
        Node::Comment { text } => {
            let _ = write!(out, "<!--{text}-->");
        }
        Node::Element {
            name,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    let _ = write!(out, "=\"{}\"", escape_attr(v));
                }
            }
            out.push('>');
            if is_void_element(name) && children.is_empty() {
                return;
            }
            for c in children {
                write_node(c, out);
            }
            let _ = write!(out, "</{name}>");
        }
    }
}

/// Indented one-node-per-line outline, for debugging and test failure output.
pub fn outline(fragment: &Fragment) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match node {
            Node::Text { text } => out.push(format!("{indent}\"{}\"", text.replace('\n', "\\n"))),
            Node::Comment { text } => out.push(format!("{indent}<!-- {text} -->")),
            Node::Element { name, children, .. } => {
                let class = node.attr("class").unwrap_or("");
                if class.is_empty() {
                    out.push(format!("{indent}<{name}>"));
                } else {
                    out.push(format!("{indent}<{name} class=\"{class}\">"));
                }
                for c in children {
                    walk(c, depth + 1, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    for node in &fragment.children {
        walk(node, 0, &mut out);
    }
    out
}

impl Fragment {
    pub fn to_markup(&self) -> String {
        to_markup(self)
    }
}

impl Node {
    pub fn to_markup(&self) -> String {
        node_to_markup(self)
    }
}
