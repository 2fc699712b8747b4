//! Structural guards that run before anything on disk is changed.
use std::path::{Component, Path};

use super::LinkSpec;
use super::paths::HOME_MARKER;
use crate::error::LinkError;
use crate::operations::FileSystemOps;

/// Validates one resolved source/destination pair.
///
/// Guards run in a fixed order and the first violation is returned; later
/// guards are not evaluated.
#[derive(Debug)]
pub struct SafetyGuard<'a> {
    home: Option<&'a Path>,
    fs: &'a dyn FileSystemOps,
}

impl<'a> SafetyGuard<'a> {
    /// Create a guard that protects `home` and checks existence through `fs`.
    #[must_use]
    pub const fn new(home: Option<&'a Path>, fs: &'a dyn FileSystemOps) -> Self {
        Self { home, fs }
    }

    /// Run every guard against `spec`.
    ///
    /// # Errors
    ///
    /// Returns the first violated guard, in order: root constraint,
    /// existence, same location, ancestor conflict, home directory.
    pub fn check(&self, spec: &LinkSpec) -> Result<(), LinkError> {
        check_root(&spec.raw_source)?;
        self.check_exists(spec)?;
        check_same_location(&spec.resolved_source, &spec.resolved_destination)?;
        check_ancestor(&spec.resolved_source, &spec.resolved_destination)?;
        self.check_home(spec)
    }

    fn check_exists(&self, spec: &LinkSpec) -> Result<(), LinkError> {
        if self.fs.exists(&spec.resolved_source) {
            Ok(())
        } else {
            Err(LinkError::NotFound {
                path: spec.raw_source.clone(),
            })
        }
    }

    fn check_home(&self, spec: &LinkSpec) -> Result<(), LinkError> {
        let home = self.home.ok_or_else(|| LinkError::Resolution {
            path: spec.raw_destination.clone(),
        })?;
        if spec.resolved_destination == home {
            return Err(LinkError::HomeGuard {
                source_path: spec.resolved_source.clone(),
                destination: spec.resolved_destination.clone(),
            });
        }
        Ok(())
    }
}

/// Sources must live under the managed root: reject absolute and home-rooted
/// raw paths.
///
/// # Errors
///
/// Returns [`LinkError::RootViolation`] for `/…`, `~…` and platform-absolute
/// paths.
pub fn check_root(raw_source: &str) -> Result<(), LinkError> {
    if raw_source.starts_with('/')
        || raw_source.starts_with(HOME_MARKER)
        || Path::new(raw_source).has_root()
    {
        return Err(LinkError::RootViolation {
            path: raw_source.to_string(),
        });
    }
    Ok(())
}

/// # Errors
///
/// Returns [`LinkError::SameLocation`] if both paths are equal.
pub fn check_same_location(source: &Path, destination: &Path) -> Result<(), LinkError> {
    if source == destination {
        return Err(LinkError::SameLocation {
            path: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// Reject a destination that is a strict ancestor of the source, since
/// replacing it would delete the source along with it.
///
/// # Errors
///
/// Returns [`LinkError::ParentConflict`] if `destination` is an ancestor.
pub fn check_ancestor(source: &Path, destination: &Path) -> Result<(), LinkError> {
    if is_strict_ancestor(destination, source) {
        return Err(LinkError::ParentConflict {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// `true` if `candidate`'s segments are a strict prefix of `path`'s segments.
///
/// Purely lexical; both paths are expected to be cleaned already.
#[must_use]
pub fn is_strict_ancestor(candidate: &Path, path: &Path) -> bool {
    let ancestor: Vec<Component<'_>> = candidate.components().collect();
    let descendant: Vec<Component<'_>> = path.components().collect();
    if ancestor.len() >= descendant.len() {
        return false;
    }
    ancestor.iter().zip(&descendant).all(|(a, d)| a == d)
}
