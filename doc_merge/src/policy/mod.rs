//! Merge policy: the immutable bundle of switches threaded through a merge.
//!
//! A [`MergePolicy`] is built once from caller configuration and then only
//! borrowed. It is `Sync`, so concurrent merges of independent document
//! groups can share one instance.

mod load;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;

/// How two sequences are reconciled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum ArrayStrategy {
    /// Merge element `i` of the overlay into element `i` of the base.
    #[default]
    Update,
    /// Replace the base sequence with the overlay sequence.
    Overwrite,
    /// Append overlay elements after the base elements.
    Append,
}

/// How head and line comments are reconciled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum CommentStrategy {
    /// Take the overlay comment only when the base comment is blank.
    #[default]
    SetWhenBlank,
    /// Keep the base comment and drop the overlay comment.
    Ignore,
    /// Concatenate both comments.
    Append,
    /// Take the overlay comment whenever it is non-blank.
    Overwrite,
}

impl ArrayStrategy {
    const NAMES: &'static str = "update, overwrite, append";

    /// Configuration name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Overwrite => "overwrite",
            Self::Append => "append",
        }
    }
}

impl CommentStrategy {
    const NAMES: &'static str = "setWhenBlank, ignore, append, overwrite";

    /// Configuration name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetWhenBlank => "setWhenBlank",
            Self::Ignore => "ignore",
            Self::Append => "append",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for ArrayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CommentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayStrategy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Update, Self::Overwrite, Self::Append]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MergeError::UnknownStrategy {
                setting: "arrays",
                value: s.to_owned(),
                expected: Self::NAMES,
            })
    }
}

impl FromStr for CommentStrategy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::SetWhenBlank, Self::Ignore, Self::Append, Self::Overwrite]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MergeError::UnknownStrategy {
                setting: "comments",
                value: s.to_owned(),
                expected: Self::NAMES,
            })
    }
}

impl TryFrom<String> for ArrayStrategy {
    type Error = MergeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for CommentStrategy {
    type Error = MergeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Switches controlling every merge decision.
///
/// Defaults: `autocreate = true`, `overwrite = false`, `arrays = update`,
/// `comments = setWhenBlank`, `deep = true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    /// Allow new top-level keys and wholly new documents from the overlay.
    pub autocreate: bool,
    /// Replace scalars, aliases, and mismatched kinds with the overlay.
    pub overwrite: bool,
    /// Strategy for sequence/sequence pairs.
    pub arrays: ArrayStrategy,
    /// Strategy for head and line comments.
    pub comments: CommentStrategy,
    /// Dereference base aliases and recurse into aligned sequence elements.
    pub deep: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            autocreate: true,
            overwrite: false,
            arrays: ArrayStrategy::default(),
            comments: CommentStrategy::default(),
            deep: true,
        }
    }
}

impl MergePolicy {
    /// Set [`MergePolicy::autocreate`].
    #[must_use]
    pub const fn with_autocreate(mut self, autocreate: bool) -> Self {
        self.autocreate = autocreate;
        self
    }

    /// Set [`MergePolicy::overwrite`].
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set [`MergePolicy::arrays`].
    #[must_use]
    pub const fn with_arrays(mut self, arrays: ArrayStrategy) -> Self {
        self.arrays = arrays;
        self
    }

    /// Set [`MergePolicy::comments`].
    #[must_use]
    pub const fn with_comments(mut self, comments: CommentStrategy) -> Self {
        self.comments = comments;
        self
    }

    /// Set [`MergePolicy::deep`].
    #[must_use]
    pub const fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }
}

#[cfg(test)]
mod tests;
