//! Link configuration and its on-disk representation.
pub mod loader;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Everything the link engine needs for one run.
///
/// `paths` maps a source (relative to the managed root) to a destination.
/// A destination ending in a separator names a directory the source is
/// placed into. Iteration is in lexicographic source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remove an existing destination before linking.
    #[serde(rename = "overwrite-existing")]
    pub overwrite: bool,
    /// Create missing parent directories of destinations.
    #[serde(rename = "make-dirs")]
    pub make_dirs: bool,
    /// Move an existing destination to `<destination>.bak` before linking.
    /// Wins over `overwrite` when both are set.
    #[serde(rename = "backup-existing")]
    pub backup: bool,
    /// Source to destination mapping.
    #[serde(deserialize_with = "null_as_empty")]
    pub paths: BTreeMap<String, String>,
}

/// Accept `paths:` with no value as an empty mapping.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Find and load the configuration file in `root`.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        loader::load(root).map(|(_, config)| config)
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when no entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
