//! Link orchestration: resolve, guard, provision, resolve conflicts, link.
//!
//! [`LinkEngine::link_all`] walks every configured entry in source order and
//! returns one [`EntryResult`] per entry. A failing entry never stops the
//! run; nothing is rolled back.
pub mod conflict;
pub mod guard;
pub mod paths;
pub mod provision;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{FailureKind, LinkError};
use crate::operations::{FileSystemOps, SystemFileSystemOps};

use conflict::{ConflictPolicy, ConflictResolver, Resolution};
use guard::SafetyGuard;
use paths::{PathResolver, is_directory_target};
use provision::DirectoryProvisioner;

/// One mapping entry with both sides resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Source exactly as configured.
    pub raw_source: String,
    /// Destination exactly as configured.
    pub raw_destination: String,
    /// Absolute, cleaned source path.
    pub resolved_source: PathBuf,
    /// Absolute, cleaned, home-expanded destination; a directory target has
    /// the source's file name appended.
    pub resolved_destination: PathBuf,
}

impl LinkSpec {
    /// Resolve a raw entry.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidEntry`] for empty paths and
    /// [`LinkError::Resolution`] if the destination needs an unknown home
    /// directory.
    pub fn resolve(
        resolver: &PathResolver,
        source: &str,
        destination: &str,
    ) -> Result<Self, LinkError> {
        if source.is_empty() || destination.is_empty() {
            return Err(LinkError::InvalidEntry {
                reason: format!("empty path in mapping '{source}' -> '{destination}'"),
            });
        }

        let resolved_source = resolver.canonicalize(Path::new(source));
        let mut resolved_destination = resolver.resolve(destination)?;

        if is_directory_target(destination) {
            let name = resolved_source
                .file_name()
                .ok_or_else(|| LinkError::InvalidEntry {
                    reason: format!(
                        "cannot place '{source}' into directory '{destination}': source has no file name"
                    ),
                })?;
            resolved_destination.push(name);
        }

        Ok(Self {
            raw_source: source.to_string(),
            raw_destination: destination.to_string(),
            resolved_source,
            resolved_destination,
        })
    }
}

/// Terminal state of one entry.
#[derive(Debug)]
pub enum Outcome {
    /// A new symlink was created.
    Linked,
    /// Nothing needed doing.
    Skipped {
        /// Why the entry was skipped.
        reason: String,
    },
    /// The entry could not be linked.
    Failed(LinkError),
}

/// Result of processing one mapping entry.
#[derive(Debug)]
pub struct EntryResult {
    /// Source exactly as configured.
    pub source: String,
    /// Destination exactly as configured.
    pub destination: String,
    /// Resolved destination, when resolution got that far.
    pub resolved_destination: Option<PathBuf>,
    /// What happened.
    pub outcome: Outcome,
}

impl EntryResult {
    /// `true` if the entry failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// The failure kind, if the entry failed.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Human-readable detail: the error for failures, the reason for skips.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Linked => None,
            Outcome::Skipped { reason } => Some(reason.clone()),
            Outcome::Failed(err) => Some(err.to_string()),
        }
    }
}

/// Drives every mapping entry through resolution, guards, provisioning,
/// conflict handling and link creation.
#[derive(Debug)]
pub struct LinkEngine {
    resolver: PathResolver,
    fs: Arc<dyn FileSystemOps>,
}

impl LinkEngine {
    /// Create an engine that works on the real filesystem.
    #[must_use]
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            fs: Arc::new(SystemFileSystemOps),
        }
    }

    /// Swap the filesystem implementation (used by tests to inject failures).
    #[must_use]
    pub fn with_fs_ops(mut self, fs: Arc<dyn FileSystemOps>) -> Self {
        self.fs = fs;
        self
    }

    /// Process every entry of `config.paths` in lexicographic source order.
    #[must_use]
    pub fn link_all(&self, config: &Config) -> Vec<EntryResult> {
        config
            .paths
            .iter()
            .map(|(source, destination)| self.link_one(config, source, destination))
            .collect()
    }

    /// Process a single entry.
    #[must_use]
    pub fn link_one(&self, config: &Config, source: &str, destination: &str) -> EntryResult {
        let mut result = EntryResult {
            source: source.to_string(),
            destination: destination.to_string(),
            resolved_destination: None,
            outcome: Outcome::Linked,
        };

        let spec = match LinkSpec::resolve(&self.resolver, source, destination) {
            Ok(spec) => spec,
            Err(err) => {
                tracing::debug!("{source}: resolution failed: {err}");
                result.outcome = Outcome::Failed(err);
                return result;
            }
        };
        result.resolved_destination = Some(spec.resolved_destination.clone());

        result.outcome = match self.apply(config, &spec) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!("{source}: {} ({err})", err.kind());
                Outcome::Failed(err)
            }
        };
        result
    }

    fn apply(&self, config: &Config, spec: &LinkSpec) -> Result<Outcome, LinkError> {
        let fs = self.fs.as_ref();
        let source = &spec.resolved_source;
        let destination = &spec.resolved_destination;

        SafetyGuard::new(self.resolver.home(), fs).check(spec)?;

        if fs.read_link(destination).is_ok_and(|existing| existing == *source) {
            tracing::debug!("ok: {} (already linked)", destination.display());
            return Ok(Outcome::Skipped {
                reason: "already linked".to_string(),
            });
        }

        let provisioner = DirectoryProvisioner::new(config.make_dirs, fs);
        if let Some(created) = provisioner.ensure_parent(destination)? {
            tracing::debug!("created directory {}", created.display());
        }

        if fs.entry_exists(destination) {
            let policy = ConflictPolicy::from_flags(config.backup, config.overwrite);
            match ConflictResolver::new(policy, fs).resolve(destination)? {
                Resolution::BackedUp(backup) => {
                    tracing::debug!("backed up {} to {}", destination.display(), backup.display());
                }
                Resolution::Removed => {
                    tracing::debug!("removed existing {}", destination.display());
                }
                Resolution::Kept => {}
            }
        }

        fs.symlink(source, destination).map_err(|err| {
            if err.kind() == io::ErrorKind::AlreadyExists {
                LinkError::AlreadyExists {
                    destination: destination.clone(),
                }
            } else {
                LinkError::SymlinkCreation {
                    source_path: source.clone(),
                    destination: destination.clone(),
                    source: err,
                }
            }
        })?;

        tracing::debug!("linked {} -> {}", destination.display(), source.display());
        Ok(Outcome::Linked)
    }
}
