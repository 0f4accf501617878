//! Anchor identity tracking for a single merge invocation.
//!
//! The registry borrows the base document's [`AnchorTable`] for the duration
//! of one merge. It never owns a body: it maps anchor names onto arena slots
//! and rewrites those slots in place, so every alias naming an anchor
//! observes the merged body afterwards.

use std::mem;

use crate::error::{MergeError, MergeResult};
use crate::node::{Anchor, AnchorTable, Node, NodeId};

/// Lookup and rebinding of anchored bodies.
#[derive(Debug)]
pub struct ReferenceRegistry<'a> {
    table: &'a mut AnchorTable,
}

impl<'a> ReferenceRegistry<'a> {
    /// Create a registry over `table`.
    #[must_use]
    pub const fn new(table: &'a mut AnchorTable) -> Self {
        Self { table }
    }

    /// Register `body` under `anchor`, replacing any previous binding.
    pub fn register(&mut self, anchor: Anchor, body: Node) -> NodeId {
        self.table.define(anchor, body)
    }

    /// Canonical body currently bound to `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnresolvedAlias`] when `anchor` is unknown.
    pub fn resolve(&self, anchor: &Anchor) -> MergeResult<&Node> {
        self.table
            .get(anchor)
            .ok_or_else(|| MergeError::unresolved(anchor))
    }

    /// Bind `anchor` to `body`, returning the previous body.
    ///
    /// Rebinding an unknown anchor registers it.
    pub fn rebind(&mut self, anchor: &Anchor, body: Node) -> Option<Node> {
        if let Some(slot) = self.slot_mut(anchor) {
            return Some(mem::replace(slot, body));
        }
        self.register(anchor.clone(), body);
        None
    }

    /// Returns `true` when `anchor` is registered.
    #[must_use]
    pub fn contains(&self, anchor: &Anchor) -> bool {
        self.table.contains(anchor)
    }

    /// Move the body of `anchor` out, leaving a null placeholder until it
    /// is rebound.
    pub(crate) fn take(&mut self, anchor: &Anchor) -> Option<Node> {
        self.slot_mut(anchor).map(mem::take)
    }

    fn slot_mut(&mut self, anchor: &Anchor) -> Option<&mut Node> {
        let id = self.table.id(anchor)?;
        self.table.node_mut(id)
    }
}
