//! Alignment of documents across input streams and the merge entry point.
//!
//! The first stream is the base; every later stream is an overlay applied in
//! order. Alignment pairs each base document with the overlay documents that
//! should be merged into it, according to a [`DocumentSelection`].

use crate::document::Document;
use crate::error::{MergeError, MergeResult};
use crate::merge::{MergeReport, adopt_document, merge_documents};
use crate::policy::MergePolicy;

/// Which documents of each stream take part in the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentSelection {
    /// Only the document at this position; other base documents pass
    /// through.
    Index(usize),
    /// Every position, aligned by index across streams.
    All,
    /// The first document of each overlay stream, applied to every base
    /// document.
    Broadcast,
    /// The first document of each overlay stream, applied to the base
    /// document at this position only.
    BroadcastTo(usize),
}

impl Default for DocumentSelection {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// A base document and the overlay documents aligned with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentGroup {
    position: usize,
    base: Option<Document>,
    overlays: Vec<Document>,
}

impl DocumentGroup {
    /// Position of the group in the output stream.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Base document, or `None` when only overlays exist at this position.
    #[must_use]
    pub const fn base(&self) -> Option<&Document> {
        self.base.as_ref()
    }

    /// Overlay documents in stream order.
    #[must_use]
    pub fn overlays(&self) -> &[Document] {
        &self.overlays
    }

    /// Returns `true` when the base passes through untouched.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Merge the overlays into the base.
    ///
    /// A group without a base produces a new document only when
    /// `autocreate` is enabled.
    #[must_use]
    pub fn merge(self, policy: &MergePolicy) -> (Option<Document>, MergeReport) {
        let mut report = MergeReport::default();
        let mut overlays = self.overlays.into_iter();
        let base = match self.base {
            Some(base) => base,
            None if !policy.autocreate => {
                tracing::debug!(
                    position = self.position,
                    "autocreate disabled; skipping overlay-only document"
                );
                return (None, report);
            }
            None => match overlays.next() {
                Some(first) => adopt_document(first, policy),
                None => return (None, report),
            },
        };
        let position = self.position;
        let merged = overlays.fold(base, |acc, overlay| {
            tracing::trace!(position, anchors = overlay.anchors().len(), "merging overlay document");
            let (doc, step) = merge_documents(acc, overlay, policy);
            report.extend(step);
            doc
        });
        (Some(merged), report)
    }
}

/// Pair base documents with their overlays.
///
/// # Errors
///
/// Returns [`MergeError::NoDocuments`] when `streams` is empty.
pub fn align(
    streams: Vec<Vec<Document>>,
    selection: DocumentSelection,
) -> MergeResult<Vec<DocumentGroup>> {
    let mut inputs = streams.into_iter();
    let base = inputs.next().ok_or(MergeError::NoDocuments)?;
    let overlays: Vec<Vec<Document>> = inputs.collect();
    let groups = match selection {
        DocumentSelection::All => align_all(base, overlays),
        DocumentSelection::Index(index) => align_index(base, overlays, index),
        DocumentSelection::Broadcast => align_broadcast(base, overlays),
        DocumentSelection::BroadcastTo(index) => {
            align_targeted(base, first_documents(overlays), index)
        }
    };
    tracing::trace!(groups = groups.len(), ?selection, "aligned document groups");
    Ok(groups)
}

fn align_all(base: Vec<Document>, overlays: Vec<Vec<Document>>) -> Vec<DocumentGroup> {
    let width = overlays
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(base.len()))
        .max()
        .unwrap_or(0);
    let mut bases = base.into_iter();
    let mut streams: Vec<_> = overlays.into_iter().map(Vec::into_iter).collect();
    (0..width)
        .map(|position| DocumentGroup {
            position,
            base: bases.next(),
            overlays: streams.iter_mut().filter_map(Iterator::next).collect(),
        })
        .collect()
}

fn align_index(
    base: Vec<Document>,
    overlays: Vec<Vec<Document>>,
    index: usize,
) -> Vec<DocumentGroup> {
    let selected = overlays
        .into_iter()
        .filter_map(|stream| stream.into_iter().nth(index))
        .collect();
    align_targeted(base, selected, index)
}

/// Merge `selected` into base document `index`; every other base document
/// passes through. Past the end of the base stream, one trailing group is
/// created.
fn align_targeted(
    base: Vec<Document>,
    mut selected: Vec<Document>,
    index: usize,
) -> Vec<DocumentGroup> {
    let base_len = base.len();
    let mut groups: Vec<DocumentGroup> = base
        .into_iter()
        .enumerate()
        .map(|(position, doc)| DocumentGroup {
            position,
            base: Some(doc),
            overlays: if position == index {
                std::mem::take(&mut selected)
            } else {
                Vec::new()
            },
        })
        .collect();
    if index >= base_len && !selected.is_empty() {
        groups.push(DocumentGroup {
            position: base_len,
            base: None,
            overlays: selected,
        });
    }
    groups
}

fn first_documents(overlays: Vec<Vec<Document>>) -> Vec<Document> {
    overlays
        .into_iter()
        .filter_map(|stream| stream.into_iter().next())
        .collect()
}

fn align_broadcast(base: Vec<Document>, overlays: Vec<Vec<Document>>) -> Vec<DocumentGroup> {
    let firsts = first_documents(overlays);
    if base.is_empty() {
        if firsts.is_empty() {
            return Vec::new();
        }
        return vec![DocumentGroup {
            position: 0,
            base: None,
            overlays: firsts,
        }];
    }
    base.into_iter()
        .enumerate()
        .map(|(position, doc)| DocumentGroup {
            position,
            base: Some(doc),
            overlays: firsts.clone(),
        })
        .collect()
}

/// Result of merging every document group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    documents: Vec<Document>,
    report: MergeReport,
}

impl MergeOutcome {
    /// Merged documents in output order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Warnings raised while merging.
    #[must_use]
    pub const fn report(&self) -> &MergeReport {
        &self.report
    }

    /// Split into documents and report.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Document>, MergeReport) {
        (self.documents, self.report)
    }
}

/// Align `streams` and merge each group, keeping the warning report.
///
/// # Errors
///
/// Returns [`MergeError::NoDocuments`] when `streams` is empty.
pub fn merge_document_groups_with_report(
    streams: Vec<Vec<Document>>,
    selection: DocumentSelection,
    policy: &MergePolicy,
) -> MergeResult<MergeOutcome> {
    let mut outcome = MergeOutcome::default();
    for group in align(streams, selection)? {
        let (document, report) = group.merge(policy);
        outcome.report.extend(report);
        outcome.documents.extend(document);
    }
    Ok(outcome)
}

/// Align `streams` and merge each group.
///
/// # Errors
///
/// Returns [`MergeError::NoDocuments`] when `streams` is empty.
///
/// # Examples
///
/// ```
/// use doc_merge::{Document, DocumentSelection, MergePolicy, Node, merge_document_groups};
///
/// let base = vec![Document::new(Node::mapping([(Node::scalar("a"), Node::scalar("1"))]))];
/// let overlay = vec![Document::new(Node::mapping([(Node::scalar("b"), Node::scalar("2"))]))];
/// let merged = merge_document_groups(
///     vec![base, overlay],
///     DocumentSelection::All,
///     &MergePolicy::default(),
/// )?;
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].get("b").and_then(Node::as_scalar), Some("2"));
/// # Ok::<_, doc_merge::MergeError>(())
/// ```
pub fn merge_document_groups(
    streams: Vec<Vec<Document>>,
    selection: DocumentSelection,
    policy: &MergePolicy,
) -> MergeResult<Vec<Document>> {
    merge_document_groups_with_report(streams, selection, policy)
        .map(|outcome| outcome.into_parts().0)
}
