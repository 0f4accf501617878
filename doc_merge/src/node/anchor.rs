//! Anchor names and the arena that owns anchored node bodies.
//!
//! A document tree never embeds an anchored body directly. Every site that
//! refers to shared content holds a [`super::Alias`] naming an [`Anchor`],
//! while the body itself lives in an [`AnchorTable`] slot addressed by a
//! [`NodeId`]. Serialisers emit the `&anchor` definition at the first alias
//! occurring in document order.

use std::collections::HashMap;
use std::fmt;

use super::Node;

/// Name of a shared node definition (`&name` in YAML).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor(String);

impl Anchor {
    /// Create an anchor from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the anchor name without the `&`/`*` sigil.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Anchor {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Handle to a slot in an [`AnchorTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Arena of anchored node bodies for one document.
///
/// Slots are kept in definition order and are never removed, so a [`NodeId`]
/// stays valid for the lifetime of the table. Redefining an existing anchor
/// replaces the body in its original slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnchorTable {
    slots: Vec<(Anchor, Node)>,
    index: HashMap<Anchor, NodeId>,
}

impl AnchorTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `anchor` as `body`, returning the slot it occupies.
    pub fn define(&mut self, anchor: Anchor, body: Node) -> NodeId {
        if let Some(id) = self.index.get(&anchor).copied() {
            if let Some(slot) = self.slots.get_mut(id.0) {
                slot.1 = body;
            }
            return id;
        }
        let id = NodeId(self.slots.len());
        self.index.insert(anchor.clone(), id);
        self.slots.push((anchor, body));
        id
    }

    /// Slot handle for `anchor`, if it has been defined.
    #[must_use]
    pub fn id(&self, anchor: &Anchor) -> Option<NodeId> {
        self.index.get(anchor).copied()
    }

    /// Body currently bound to `anchor`.
    #[must_use]
    pub fn get(&self, anchor: &Anchor) -> Option<&Node> {
        self.id(anchor).and_then(|id| self.node(id))
    }

    /// Body stored in slot `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|(_, body)| body)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).map(|(_, body)| body)
    }

    /// Returns `true` when `anchor` has a body.
    #[must_use]
    pub fn contains(&self, anchor: &Anchor) -> bool {
        self.index.contains_key(anchor)
    }

    /// Number of defined anchors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no anchors are defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over anchors and their bodies in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&Anchor, &Node)> {
        self.slots.iter().map(|(anchor, body)| (anchor, body))
    }

    /// Apply `f` to every body in place.
    pub(crate) fn for_each_body_mut(&mut self, mut f: impl FnMut(&mut Node)) {
        for (_, body) in &mut self.slots {
            f(body);
        }
    }
}

impl IntoIterator for AnchorTable {
    type Item = (Anchor, Node);
    type IntoIter = std::vec::IntoIter<(Anchor, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl FromIterator<(Anchor, Node)> for AnchorTable {
    fn from_iter<I: IntoIterator<Item = (Anchor, Node)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (anchor, body) in iter {
            table.define(anchor, body);
        }
        table
    }
}
