//! Shared helpers for working with `figment::Jail` in tests.
//!
//! Policy loading reads `DOC_MERGE_*` environment variables, so tests that
//! exercise it run inside a jail that restores the environment afterwards.

use anyhow::{Result, anyhow};
use doc_merge::{MergeError, MergePolicy};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it returns an
/// error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Load a [`MergePolicy`] with `vars` set in a jailed environment.
///
/// The outer result reports jail failures; the inner one is the outcome of
/// [`MergePolicy::load`], so tests can assert on rejected values.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up.
pub fn load_policy_with_env(vars: &[(&str, &str)]) -> Result<Result<MergePolicy, MergeError>> {
    with_jail(|j| {
        for (key, value) in vars {
            j.set_env(key, value);
        }
        Ok(MergePolicy::load())
    })
}
