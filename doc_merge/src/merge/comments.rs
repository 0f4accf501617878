//! Comment reconciliation.

use crate::node::Comments;
use crate::policy::CommentStrategy;

/// Separator placed between appended line comments.
pub const LINE_SEPARATOR: &str = " # ";

/// Separator placed between appended head comments.
pub const HEAD_SEPARATOR: &str = "\n";

impl CommentStrategy {
    /// Combine a base and an overlay comment, joining with `separator` when
    /// the strategy appends.
    ///
    /// # Examples
    ///
    /// ```
    /// use doc_merge::CommentStrategy;
    /// use doc_merge::merge::LINE_SEPARATOR;
    ///
    /// assert_eq!(CommentStrategy::SetWhenBlank.combine("A", "B", LINE_SEPARATOR), "A");
    /// assert_eq!(CommentStrategy::Append.combine("A", "B", LINE_SEPARATOR), "A # B");
    /// assert_eq!(CommentStrategy::Overwrite.combine("A", "", LINE_SEPARATOR), "A");
    /// ```
    #[must_use]
    pub fn combine(self, base: &str, overlay: &str, separator: &str) -> String {
        match self {
            Self::Ignore => base.to_owned(),
            Self::SetWhenBlank if base.is_empty() => overlay.to_owned(),
            Self::SetWhenBlank => base.to_owned(),
            Self::Overwrite if overlay.is_empty() => base.to_owned(),
            Self::Overwrite => overlay.to_owned(),
            Self::Append if base.is_empty() => overlay.to_owned(),
            Self::Append if overlay.is_empty() => base.to_owned(),
            Self::Append => format!("{base}{separator}{overlay}"),
        }
    }
}

impl Comments {
    /// Reconcile head and line comments independently.
    #[must_use]
    pub fn merged(&self, overlay: &Self, strategy: CommentStrategy) -> Self {
        Self {
            head: strategy.combine(&self.head, &overlay.head, HEAD_SEPARATOR),
            line: strategy.combine(&self.line, &overlay.line, LINE_SEPARATOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::LINE_SEPARATOR;
    use crate::node::Comments;
    use crate::policy::CommentStrategy;

    #[rstest]
    #[case::blank_keeps_base(CommentStrategy::SetWhenBlank, "A", "B", "A")]
    #[case::blank_fills_empty(CommentStrategy::SetWhenBlank, "", "B", "B")]
    #[case::ignore_keeps_base(CommentStrategy::Ignore, "A", "B", "A")]
    #[case::ignore_keeps_empty(CommentStrategy::Ignore, "", "B", "")]
    #[case::append_joins(CommentStrategy::Append, "A", "B", "A # B")]
    #[case::append_into_empty(CommentStrategy::Append, "", "B", "B")]
    #[case::append_nothing(CommentStrategy::Append, "A", "", "A")]
    #[case::overwrite_replaces(CommentStrategy::Overwrite, "A", "B", "B")]
    #[case::overwrite_blank_keeps(CommentStrategy::Overwrite, "A", "", "A")]
    fn comment_policy_matrix(
        #[case] strategy: CommentStrategy,
        #[case] base: &str,
        #[case] overlay: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(strategy.combine(base, overlay, LINE_SEPARATOR), expected);
    }

    #[test]
    fn head_comments_append_on_new_line() {
        let base = Comments {
            head: "first".into(),
            line: String::new(),
        };
        let overlay = Comments {
            head: "second".into(),
            line: "tail".into(),
        };
        let merged = base.merged(&overlay, CommentStrategy::Append);
        assert_eq!(merged.head, "first\nsecond");
        assert_eq!(merged.line, "tail");
    }
}
