//! Loading a [`MergePolicy`] from layered configuration providers.

use figment::{
    Figment,
    providers::{Env, Serialized},
};

use super::MergePolicy;
use crate::error::{MergeError, MergeResult};

impl MergePolicy {
    /// Prefix of environment variables read by [`MergePolicy::figment`].
    pub const ENV_PREFIX: &'static str = "DOC_MERGE_";

    /// Providers for the policy: built-in defaults overlaid with
    /// `DOC_MERGE_*` environment variables.
    ///
    /// Callers may merge further providers (a config file, CLI values) on
    /// top before handing the figment to [`MergePolicy::from_figment`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Extract a policy from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Configuration`] when a provider fails or a value
    /// has the wrong type.
    pub fn from_figment(figment: &Figment) -> MergeResult<Self> {
        figment.extract().map_err(MergeError::configuration)
    }

    /// Load the policy from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Configuration`] when extraction fails.
    pub fn load() -> MergeResult<Self> {
        let policy = Self::from_figment(&Self::figment())?;
        tracing::debug!(
            autocreate = policy.autocreate,
            overwrite = policy.overwrite,
            arrays = %policy.arrays,
            comments = %policy.comments,
            deep = policy.deep,
            "loaded merge policy"
        );
        Ok(policy)
    }
}
