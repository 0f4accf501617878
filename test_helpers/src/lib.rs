//! Test helpers shared across the doc-merge workspace.
//!
//! [`nodes`] offers terse builders for node trees and documents,
//! [`samples`] holds documents shared by merge scenarios, and
//! [`crate::figment`] wraps `figment::Jail` for configuration tests.

pub mod figment;
pub mod nodes;
pub mod samples;
