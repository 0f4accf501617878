//! Recursive merge of an overlay tree into a base tree.
//!
//! The merger consumes both trees and returns the authoritative result.
//! Every pairing of node kinds has a defined outcome under a
//! [`MergePolicy`], so nothing here fails: conflicts resolve to either the
//! base or the overlay, and dangling aliases are recorded in a
//! [`MergeReport`] instead of aborting.
//!
//! # Examples
//!
//! ```
//! use doc_merge::{MergePolicy, Node, ReferenceRegistry, node::AnchorTable};
//! use doc_merge::merge::merge_nodes;
//!
//! let base = Node::mapping([(Node::scalar("a"), Node::scalar("1"))]);
//! let overlay = Node::mapping([(Node::scalar("b"), Node::scalar("2"))]);
//! let mut anchors = AnchorTable::new();
//! let merged = merge_nodes(
//!     base,
//!     overlay,
//!     &MergePolicy::default(),
//!     ReferenceRegistry::new(&mut anchors),
//! );
//! assert_eq!(merged.get("b").and_then(Node::as_scalar), Some("2"));
//! ```

mod comments;
mod sequence;

use std::collections::{HashMap, HashSet};
use std::mem;

pub use comments::{HEAD_SEPARATOR, LINE_SEPARATOR};

use crate::document::Document;
use crate::error::MergeWarning;
use crate::node::{Alias, Anchor, AnchorTable, Mapping, Node, Scalar};
use crate::policy::{CommentStrategy, MergePolicy};
use crate::registry::ReferenceRegistry;

/// Depth class of the node being merged; only root mapping entries are
/// subject to `autocreate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Root,
    Nested,
}

/// Non-fatal conditions collected during a merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    warnings: Vec<MergeWarning>,
}

impl MergeReport {
    /// Warnings in the order they were raised.
    #[must_use]
    pub fn warnings(&self) -> &[MergeWarning] {
        &self.warnings
    }

    /// Returns `true` when no warnings were raised.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Append the warnings of `other`.
    pub fn extend(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
    }

    pub(crate) fn push(&mut self, warning: MergeWarning) {
        self.warnings.push(warning);
    }
}

/// Stateful merger for one document pair.
///
/// Anchors are scoped to the document that defines them. Overlay anchors are
/// held apart from the registry and only imported when an overlay alias is
/// adopted into the result; a name the base already uses is imported under a
/// fresh name so the two identities never meet.
pub struct Merger<'p, 'a> {
    policy: &'p MergePolicy,
    registry: ReferenceRegistry<'a>,
    overlay_anchors: AnchorTable,
    imported: HashMap<Anchor, Anchor>,
    active: HashSet<Anchor>,
    report: MergeReport,
}

impl<'p, 'a> Merger<'p, 'a> {
    /// Create a merger applying `policy` and resolving aliases via
    /// `registry`.
    ///
    /// Until [`Merger::import_anchors`] is called, overlay aliases name
    /// anchors in `registry` directly.
    #[must_use]
    pub fn new(policy: &'p MergePolicy, registry: ReferenceRegistry<'a>) -> Self {
        Self {
            policy,
            registry,
            overlay_anchors: AnchorTable::new(),
            imported: HashMap::new(),
            active: HashSet::new(),
            report: MergeReport::default(),
        }
    }

    /// Merge a document root. Top-level key creation honours `autocreate`.
    pub fn merge(&mut self, base: Node, overlay: Node) -> Node {
        self.merge_at(base, overlay, Level::Root)
    }

    /// Supply the anchors defined by the overlay document.
    ///
    /// Bodies are registered lazily, the first time adopted overlay content
    /// refers to them. Anchors the overlay never contributes stay out of the
    /// result.
    pub fn import_anchors(&mut self, anchors: AnchorTable) {
        self.overlay_anchors = anchors;
        self.imported.clear();
    }

    /// Finish the merge and return the collected warnings.
    #[must_use]
    pub fn into_report(self) -> MergeReport {
        self.report
    }

    fn merge_at(&mut self, base: Node, overlay: Node, level: Level) -> Node {
        if base.is_null() {
            return self.replace(base, overlay);
        }
        match (base, overlay) {
            (kept, Node::Null(_)) => kept,
            (Node::Alias(left), Node::Alias(right)) if self.same_target(&left.anchor, &right.anchor) => {
                let comments = left.comments.merged(&right.comments, self.policy.comments);
                Node::Alias(Alias { comments, ..left })
            }
            (current, incoming @ Node::Alias(_)) => self.merge_leaf(current, incoming),
            (Node::Alias(alias), incoming) if self.policy.deep => {
                self.merge_through_alias(alias, incoming, level)
            }
            (Node::Scalar(left), Node::Scalar(right)) => Node::Scalar(self.merge_scalar(left, right)),
            (Node::Mapping(left), Node::Mapping(right)) => {
                Node::Mapping(self.merge_mapping(left, right, level))
            }
            (Node::Sequence(left), Node::Sequence(right)) => self.merge_sequence(left, right),
            (current, incoming) => self.merge_leaf(current, incoming),
        }
    }

    /// Returns `true` when an overlay alias denotes the same content as a
    /// base alias.
    fn same_target(&self, base: &Anchor, overlay: &Anchor) -> bool {
        if let Some(target) = self.imported.get(overlay) {
            return target == base;
        }
        base == overlay
            && self.overlay_anchors.get(overlay).is_none_or(|body| {
                self.registry
                    .resolve(base)
                    .is_ok_and(|current| current.content_eq(body))
            })
    }

    /// Resolve a pairing that cannot be merged structurally: the overlay
    /// wins only when `overwrite` is set. A kept base still reconciles its
    /// own comments.
    fn merge_leaf(&mut self, mut base: Node, overlay: Node) -> Node {
        if overlay.is_null() {
            return base;
        }
        if base.is_null() || self.policy.overwrite {
            return self.replace(base, overlay);
        }
        tracing::debug!(
            base = %base.kind(),
            overlay = %overlay.kind(),
            "overwrite disabled; keeping base value"
        );
        let comments = base
            .comments()
            .merged(overlay.comments(), self.policy.comments);
        *base.comments_mut() = comments;
        base
    }

    /// Take `overlay` wholesale, reconciling only the node's own comments.
    fn replace(&mut self, base: Node, overlay: Node) -> Node {
        let mut adopted = self.adopt(overlay);
        let comments = base
            .comments()
            .merged(adopted.comments(), self.policy.comments);
        *adopted.comments_mut() = comments;
        adopted
    }

    /// Prepare overlay content that has no base counterpart.
    fn adopt(&mut self, mut overlay: Node) -> Node {
        if self.policy.comments == CommentStrategy::Ignore {
            overlay.strip_comments();
        }
        self.relink(&mut overlay);
        overlay
    }

    /// Point every alias in adopted overlay content at its imported anchor.
    fn relink(&mut self, node: &mut Node) {
        match node {
            Node::Alias(alias) => alias.anchor = self.import_anchor(&alias.anchor),
            Node::Mapping(mapping) => {
                for (key, value) in &mut mapping.entries {
                    self.relink(key);
                    self.relink(value);
                }
            }
            Node::Sequence(sequence) => {
                for item in &mut sequence.items {
                    self.relink(item);
                }
            }
            Node::Scalar(_) | Node::Null(_) => {}
        }
    }

    /// Register the overlay body of `anchor` and return the name it is bound
    /// to in the result. Aliases without an overlay body keep their name.
    fn import_anchor(&mut self, anchor: &Anchor) -> Anchor {
        if let Some(target) = self.imported.get(anchor) {
            return target.clone();
        }
        let Some(body) = self.overlay_anchors.get(anchor).cloned() else {
            return anchor.clone();
        };
        let target = self.fresh_name(anchor);
        if target != *anchor {
            tracing::debug!(%anchor, renamed = %target, "overlay anchor name taken; renaming");
        }
        self.imported.insert(anchor.clone(), target.clone());
        self.registry.register(target.clone(), Node::null());
        let adopted = self.adopt(body);
        self.registry.rebind(&target, adopted);
        target
    }

    fn fresh_name(&self, anchor: &Anchor) -> Anchor {
        if !self.registry.contains(anchor) {
            return anchor.clone();
        }
        let mut suffix = 1_usize;
        loop {
            let candidate = Anchor::new(format!("{anchor}_{suffix}"));
            if !self.registry.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn merge_scalar(&self, mut base: Scalar, overlay: Scalar) -> Scalar {
        base.comments = base
            .comments
            .merged(&overlay.comments, self.policy.comments);
        if self.policy.overwrite {
            base.value = overlay.value;
            base.tag = overlay.tag;
        }
        base
    }

    fn merge_mapping(&mut self, mut base: Mapping, overlay: Mapping, level: Level) -> Mapping {
        base.comments = base
            .comments
            .merged(&overlay.comments, self.policy.comments);
        for (key, value) in overlay.entries {
            match base.position(&key) {
                Some(index) => {
                    let Some((base_key, base_value)) = base.entries.get_mut(index) else {
                        continue;
                    };
                    let key_comments = base_key
                        .comments()
                        .merged(key.comments(), self.policy.comments);
                    *base_key.comments_mut() = key_comments;
                    let existing = mem::take(base_value);
                    *base_value = self.merge_at(existing, value, Level::Nested);
                }
                None if level == Level::Root && !self.policy.autocreate => {
                    tracing::debug!(
                        key = key.as_scalar().unwrap_or("<complex key>"),
                        "autocreate disabled; skipping new top-level key"
                    );
                }
                None => {
                    let entry = (self.adopt(key), self.adopt(value));
                    base.entries.push(entry);
                }
            }
        }
        base
    }

    fn merge_through_alias(&mut self, alias: Alias, overlay: Node, level: Level) -> Node {
        if self.active.contains(&alias.anchor) {
            tracing::debug!(
                anchor = %alias.anchor,
                "alias refers to the body being merged; treating it as opaque"
            );
            return self.merge_leaf(Node::Alias(alias), overlay);
        }
        let Some(body) = self.registry.take(&alias.anchor) else {
            tracing::warn!(anchor = %alias.anchor, "unresolved alias; leaving it unmerged");
            self.report.push(MergeWarning::UnresolvedAlias {
                anchor: alias.anchor.clone(),
            });
            return self.merge_leaf(Node::Alias(alias), overlay);
        };
        self.active.insert(alias.anchor.clone());
        let merged = self.merge_at(body, overlay, level);
        self.active.remove(&alias.anchor);
        self.registry.rebind(&alias.anchor, merged);
        Node::Alias(alias)
    }
}

/// Merge `overlay` into `base` as document roots.
///
/// The returned node is the sole valid result; `base` may have been reused
/// or replaced.
#[must_use]
pub fn merge_nodes(
    base: Node,
    overlay: Node,
    policy: &MergePolicy,
    registry: ReferenceRegistry<'_>,
) -> Node {
    Merger::new(policy, registry).merge(base, overlay)
}

/// Merge one overlay document into a base document.
///
/// A fresh [`ReferenceRegistry`] is created over the base document's anchors
/// and the roots are merged. Overlay anchors enter the result only through
/// adopted aliases.
#[must_use]
pub fn merge_documents(
    base: Document,
    overlay: Document,
    policy: &MergePolicy,
) -> (Document, MergeReport) {
    let (root, mut anchors) = base.into_parts();
    let (overlay_root, overlay_anchors) = overlay.into_parts();
    let mut merger = Merger::new(policy, ReferenceRegistry::new(&mut anchors));
    merger.import_anchors(overlay_anchors);
    let merged = merger.merge(root, overlay_root);
    let report = merger.into_report();
    (Document::from_parts(merged, anchors), report)
}

/// Turn an overlay document into a new output document.
#[must_use]
pub fn adopt_document(mut overlay: Document, policy: &MergePolicy) -> Document {
    if policy.comments == CommentStrategy::Ignore {
        overlay.strip_comments();
    }
    overlay
}
