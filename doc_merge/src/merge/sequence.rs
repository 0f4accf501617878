//! Sequence strategies.

use std::mem;

use super::{Level, Merger};
use crate::node::{Node, Sequence};
use crate::policy::ArrayStrategy;

impl Merger<'_, '_> {
    pub(super) fn merge_sequence(&mut self, mut base: Sequence, overlay: Sequence) -> Node {
        match self.policy.arrays {
            ArrayStrategy::Overwrite => {
                self.replace(Node::Sequence(base), Node::Sequence(overlay))
            }
            ArrayStrategy::Append => {
                base.comments = base
                    .comments
                    .merged(&overlay.comments, self.policy.comments);
                base.items
                    .extend(overlay.items.into_iter().map(|item| self.adopt(item)));
                Node::Sequence(base)
            }
            ArrayStrategy::Update => {
                base.comments = base
                    .comments
                    .merged(&overlay.comments, self.policy.comments);
                let mut existing = mem::take(&mut base.items).into_iter();
                let mut incoming = overlay.items.into_iter();
                let aligned = existing.len().min(incoming.len());
                let mut items: Vec<Node> = existing
                    .by_ref()
                    .take(aligned)
                    .zip(incoming.by_ref().take(aligned))
                    .map(|(item, next)| self.merge_element(item, next))
                    .collect();
                items.extend(existing);
                items.extend(incoming.map(|extra| self.adopt(extra)));
                base.items = items;
                Node::Sequence(base)
            }
        }
    }

    /// Aligned elements recurse only in deep mode; shallow mode treats them
    /// as leaves.
    fn merge_element(&mut self, item: Node, next: Node) -> Node {
        if self.policy.deep {
            self.merge_at(item, next, Level::Nested)
        } else {
            self.merge_leaf(item, next)
        }
    }
}
