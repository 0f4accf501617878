//! Integration tests for loading a merge policy from configuration layers.
//!
//! Each test runs inside a `figment::Jail` so `DOC_MERGE_*` variables do not
//! leak between tests.

use anyhow::{Result, ensure};
use doc_merge::{ArrayStrategy, CommentStrategy, MergeError, MergePolicy};
use figment::providers::Serialized;
use rstest::rstest;
use test_helpers::figment::{load_policy_with_env, with_jail};

#[rstest]
fn defaults_apply_without_environment() -> Result<()> {
    let policy = load_policy_with_env(&[])??;
    ensure!(policy == MergePolicy::default(), "unexpected policy: {policy:?}");
    Ok(())
}

#[rstest]
fn environment_overrides_defaults() -> Result<()> {
    let policy = load_policy_with_env(&[
        ("DOC_MERGE_ARRAYS", "append"),
        ("DOC_MERGE_COMMENTS", "setWhenBlank"),
        ("DOC_MERGE_OVERWRITE", "true"),
        ("DOC_MERGE_AUTOCREATE", "false"),
    ])??;
    ensure!(policy.arrays == ArrayStrategy::Append, "arrays: {}", policy.arrays);
    ensure!(
        policy.comments == CommentStrategy::SetWhenBlank,
        "comments: {}",
        policy.comments
    );
    ensure!(policy.overwrite, "overwrite not applied");
    ensure!(!policy.autocreate, "autocreate not applied");
    ensure!(policy.deep, "deep changed");
    Ok(())
}

#[rstest]
fn strategy_names_ignore_case_in_the_environment() -> Result<()> {
    let policy = load_policy_with_env(&[
        ("DOC_MERGE_COMMENTS", "setwhenblank"),
        ("DOC_MERGE_ARRAYS", "APPEND"),
    ])??;
    ensure!(
        policy.comments == CommentStrategy::SetWhenBlank,
        "comments: {}",
        policy.comments
    );
    ensure!(policy.arrays == ArrayStrategy::Append, "arrays: {}", policy.arrays);
    Ok(())
}

#[rstest]
#[case::arrays("DOC_MERGE_ARRAYS", "sideways")]
#[case::comments("DOC_MERGE_COMMENTS", "shout")]
#[case::flag("DOC_MERGE_DEEP", "perhaps")]
fn invalid_values_are_configuration_errors(
    #[case] key: &str,
    #[case] value: &str,
) -> Result<()> {
    let result = load_policy_with_env(&[(key, value)])?;
    ensure!(
        matches!(result, Err(MergeError::Configuration(_))),
        "expected a configuration error, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn later_providers_take_precedence_over_environment() -> Result<()> {
    let policy = with_jail(|j| {
        j.set_env("DOC_MERGE_OVERWRITE", "true");
        let figment = MergePolicy::figment()
            .merge(Serialized::default("overwrite", false))
            .merge(Serialized::default("comments", "append"));
        MergePolicy::from_figment(&figment).map_err(|err| figment::Error::from(err.to_string()))
    })?;
    ensure!(!policy.overwrite, "environment won over explicit layer");
    ensure!(policy.comments == CommentStrategy::Append, "comments not applied");
    Ok(())
}
