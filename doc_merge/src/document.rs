//! A single document: a root node plus the anchors it defines.

use crate::node::{Anchor, AnchorTable, Node};

/// One document of an input stream.
///
/// Anchors are document-scoped, so each document owns its own
/// [`AnchorTable`]. Aliases in the tree resolve against that table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    root: Node,
    anchors: AnchorTable,
}

impl Document {
    /// Create a document without anchors.
    #[must_use]
    pub fn new(root: Node) -> Self {
        Self {
            root,
            anchors: AnchorTable::new(),
        }
    }

    /// Reassemble a document from its root and anchor table.
    #[must_use]
    pub const fn from_parts(root: Node, anchors: AnchorTable) -> Self {
        Self { root, anchors }
    }

    /// Define `anchor` as `body` and return the document.
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<Anchor>, body: Node) -> Self {
        self.anchors.define(anchor.into(), body);
        self
    }

    /// Root node of the tree.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Anchors defined by this document.
    #[must_use]
    pub const fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    /// Split the document into its root and anchor table.
    #[must_use]
    pub fn into_parts(self) -> (Node, AnchorTable) {
        (self.root, self.anchors)
    }

    /// Body bound to the anchor `name`.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<&Node> {
        self.anchors.get(&Anchor::from(name))
    }

    /// Follow `node` through one alias hop.
    ///
    /// Non-alias nodes and dangling aliases are returned unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, node: &'a Node) -> &'a Node {
        node.as_alias()
            .and_then(|anchor| self.anchors.get(anchor))
            .unwrap_or(node)
    }

    /// Look up a top-level key, following aliases on the root and the value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.resolve(&self.root)
            .get(key)
            .map(|value| self.resolve(value))
    }

    /// Remove every comment from the tree and the anchored bodies.
    pub fn strip_comments(&mut self) {
        self.root.strip_comments();
        self.anchors.for_each_body_mut(Node::strip_comments);
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}
