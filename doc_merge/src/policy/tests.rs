//! Unit tests for strategy parsing and policy defaults.

use figment::Figment;
use figment::providers::Serialized;
use rstest::rstest;

use super::{ArrayStrategy, CommentStrategy, MergePolicy};
use crate::error::MergeError;

#[test]
fn defaults_match_documented_surface() {
    let policy = MergePolicy::default();
    assert!(policy.autocreate);
    assert!(!policy.overwrite);
    assert_eq!(policy.arrays, ArrayStrategy::Update);
    assert_eq!(policy.comments, CommentStrategy::SetWhenBlank);
    assert!(policy.deep);
}

#[rstest]
#[case("update", ArrayStrategy::Update)]
#[case("overwrite", ArrayStrategy::Overwrite)]
#[case("APPEND", ArrayStrategy::Append)]
fn parses_array_strategy(#[case] input: &str, #[case] expected: ArrayStrategy) {
    assert_eq!(input.parse::<ArrayStrategy>().expect("parse"), expected);
}

#[rstest]
#[case("setWhenBlank", CommentStrategy::SetWhenBlank)]
#[case("setwhenblank", CommentStrategy::SetWhenBlank)]
#[case("ignore", CommentStrategy::Ignore)]
#[case("append", CommentStrategy::Append)]
#[case(" overwrite ", CommentStrategy::Overwrite)]
fn parses_comment_strategy(#[case] input: &str, #[case] expected: CommentStrategy) {
    assert_eq!(input.parse::<CommentStrategy>().expect("parse"), expected);
}

#[test]
fn rejects_unknown_strategy() {
    let err = "merge".parse::<ArrayStrategy>().expect_err("unknown");
    assert!(matches!(
        err,
        MergeError::UnknownStrategy { setting: "arrays", .. }
    ));
}

#[test]
fn display_round_trips_through_from_str() {
    for strategy in [
        CommentStrategy::SetWhenBlank,
        CommentStrategy::Ignore,
        CommentStrategy::Append,
        CommentStrategy::Overwrite,
    ] {
        assert_eq!(
            strategy.to_string().parse::<CommentStrategy>().expect("parse"),
            strategy
        );
    }
}

#[test]
fn builders_set_each_switch() {
    let policy = MergePolicy::default()
        .with_autocreate(false)
        .with_overwrite(true)
        .with_arrays(ArrayStrategy::Append)
        .with_comments(CommentStrategy::Ignore)
        .with_deep(false);
    assert_eq!(
        policy,
        MergePolicy {
            autocreate: false,
            overwrite: true,
            arrays: ArrayStrategy::Append,
            comments: CommentStrategy::Ignore,
            deep: false,
        }
    );
}

#[rstest]
#[case::camel_case("append", "setWhenBlank")]
#[case::lower_case("APPEND", "setwhenblank")]
#[case::padded(" Append ", "SETWHENBLANK")]
fn extraction_accepts_what_from_str_accepts(#[case] arrays: &str, #[case] comments: &str) {
    let figment = Figment::from(Serialized::defaults(MergePolicy::default()))
        .merge(Serialized::default("arrays", arrays))
        .merge(Serialized::default("comments", comments));
    let policy: MergePolicy = figment.extract().expect("extract");
    assert_eq!(policy.arrays, ArrayStrategy::Append);
    assert_eq!(policy.comments, CommentStrategy::SetWhenBlank);
}

#[test]
fn serialization_keeps_canonical_names() {
    let figment = Figment::from(Serialized::defaults(
        MergePolicy::default().with_comments(CommentStrategy::SetWhenBlank),
    ));
    let name: String = figment.extract_inner("comments").expect("comments");
    assert_eq!(name, "setWhenBlank");
}
