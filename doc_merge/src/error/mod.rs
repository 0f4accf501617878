//! Error and warning types produced by the merge engine.

mod types;

pub use types::{MergeError, MergeWarning};

/// Result alias used throughout the crate.
pub type MergeResult<T> = Result<T, MergeError>;
