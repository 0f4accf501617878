//! Builders for node trees used across tests.

use doc_merge::{Document, Node};

/// Untagged scalar.
#[must_use]
pub fn s(value: &str) -> Node {
    Node::scalar(value)
}

/// Scalar with a line comment.
#[must_use]
pub fn sc(value: &str, comment: &str) -> Node {
    Node::scalar(value).with_line_comment(comment)
}

/// Mapping from scalar keys.
#[must_use]
pub fn map<const N: usize>(entries: [(&str, Node); N]) -> Node {
    Node::mapping(entries.map(|(key, value)| (Node::scalar(key), value)))
}

/// Sequence of scalars.
#[must_use]
pub fn seq(items: &[&str]) -> Node {
    Node::sequence(items.iter().copied().map(Node::scalar))
}

/// Anchorless document.
#[must_use]
pub fn doc(root: Node) -> Document {
    Document::new(root)
}

/// Scalar values of a sequence node, or empty when `node` is not a sequence.
#[must_use]
pub fn scalars(node: &Node) -> Vec<&str> {
    node.as_sequence()
        .map(|seq| seq.items.iter().filter_map(Node::as_scalar).collect())
        .unwrap_or_default()
}

/// Scalar keys of a mapping node, in order.
#[must_use]
pub fn keys(node: &Node) -> Vec<&str> {
    node.as_mapping()
        .map(|mapping| mapping.scalar_keys().collect())
        .unwrap_or_default()
}
