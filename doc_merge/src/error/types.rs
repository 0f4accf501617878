//! Primary error enum and non-fatal warnings for merge flows.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::node::Anchor;

/// Errors surfaced to callers of the merge engine.
///
/// Node-level conflicts are never errors: every pairing of node kinds and
/// policies has a defined outcome. Only preconditions, registry lookups, and
/// configuration failures are reported here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The caller supplied no input streams.
    #[error("no documents provided")]
    NoDocuments,

    /// An alias names an anchor that is not registered.
    #[error("unresolved alias '*{anchor}'")]
    UnresolvedAlias {
        /// Anchor the alias refers to.
        anchor: Anchor,
    },

    /// A strategy name did not match any known variant.
    #[error("unknown {setting} strategy '{value}'; expected one of: {expected}")]
    UnknownStrategy {
        /// Policy setting being parsed, such as `arrays`.
        setting: &'static str,
        /// Rejected input.
        value: String,
        /// Comma-separated list of accepted names.
        expected: &'static str,
    },

    /// The merge policy could not be extracted from its providers.
    #[error("Failed to load merge policy: {0}")]
    Configuration(#[from] Box<FigmentError>),
}

impl MergeError {
    /// Construct a configuration error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use doc_merge::MergeError;
    /// let err = MergeError::configuration(figment::Error::from(String::from("boom")));
    /// assert!(matches!(err, MergeError::Configuration(_)));
    /// ```
    #[must_use]
    pub fn configuration(source: FigmentError) -> Self {
        Self::Configuration(Box::new(source))
    }

    /// Construct an unresolved alias error for `anchor`.
    #[must_use]
    pub fn unresolved(anchor: &Anchor) -> Self {
        Self::UnresolvedAlias {
            anchor: anchor.clone(),
        }
    }
}

impl From<FigmentError> for MergeError {
    fn from(e: FigmentError) -> Self {
        Self::configuration(e)
    }
}

/// Conditions that are reported but never interrupt a merge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeWarning {
    /// A base alias pointed at an unregistered anchor and was kept opaque.
    UnresolvedAlias {
        /// Anchor the alias refers to.
        anchor: Anchor,
    },
}

impl std::fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedAlias { anchor } => {
                write!(f, "alias '*{anchor}' has no anchor; left unmerged")
            }
        }
    }
}
