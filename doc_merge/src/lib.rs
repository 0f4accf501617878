//! Structural merging of YAML-like document trees.
//!
//! An overlay tree is merged into a base tree under a [`MergePolicy`]:
//! mappings merge by key, sequences by an [`ArrayStrategy`], and comments by
//! a [`CommentStrategy`]. Anchors and aliases keep their identity, so every
//! alias that shares an anchor observes the merged body.
//!
//! Whole streams of documents are aligned and merged with
//! [`merge_document_groups`].
//!
//! ```
//! use doc_merge::{Document, DocumentSelection, MergePolicy, Node, merge_document_groups};
//!
//! let base = Document::new(Node::mapping([
//!     (Node::scalar("a"), Node::scalar("simple").with_line_comment("just the best")),
//! ]));
//! let overlay = Document::new(Node::mapping([
//!     (Node::scalar("a"), Node::scalar("other")),
//! ]));
//! let policy = MergePolicy::default().with_overwrite(true);
//! let merged = merge_document_groups(vec![vec![base], vec![overlay]], DocumentSelection::All, &policy)?;
//! let a = merged[0].get("a").expect("key kept");
//! assert_eq!(a.as_scalar(), Some("other"));
//! assert_eq!(a.comments().line, "just the best");
//! # Ok::<_, doc_merge::MergeError>(())
//! ```

pub mod align;
#[cfg(feature = "serde_json")]
mod convert;
mod document;
mod error;
pub mod merge;
pub mod node;
pub mod policy;
mod registry;

pub use align::{
    DocumentGroup, DocumentSelection, MergeOutcome, merge_document_groups,
    merge_document_groups_with_report,
};
pub use document::Document;
pub use error::{MergeError, MergeResult, MergeWarning};
pub use merge::{MergeReport, Merger, merge_documents, merge_nodes};
pub use node::{Anchor, Node, NodeKind};
pub use policy::{ArrayStrategy, CommentStrategy, MergePolicy};
pub use registry::ReferenceRegistry;
