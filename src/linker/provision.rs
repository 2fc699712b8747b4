//! Parent directory provisioning for link destinations.
use std::path::{Path, PathBuf};

use crate::error::LinkError;
use crate::operations::FileSystemOps;

/// Ensures the parent directory of a destination exists.
#[derive(Debug)]
pub struct DirectoryProvisioner<'a> {
    make_dirs: bool,
    fs: &'a dyn FileSystemOps,
}

impl<'a> DirectoryProvisioner<'a> {
    /// Create a provisioner; `make_dirs` permits creating missing parents.
    #[must_use]
    pub const fn new(make_dirs: bool, fs: &'a dyn FileSystemOps) -> Self {
        Self { make_dirs, fs }
    }

    /// Make sure `destination`'s parent exists.
    ///
    /// Returns the directory that was created, or `None` when the parent was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingDirectory`] when the parent is absent and
    /// creation is not permitted (nothing is touched), or
    /// [`LinkError::CreateDirectory`] when creating it fails.
    pub fn ensure_parent(&self, destination: &Path) -> Result<Option<PathBuf>, LinkError> {
        let Some(parent) = destination.parent() else {
            return Ok(None);
        };
        if self.fs.exists(parent) {
            return Ok(None);
        }
        if !self.make_dirs {
            return Err(LinkError::MissingDirectory {
                dir: parent.to_path_buf(),
            });
        }
        self.fs
            .create_dir_all(parent)
            .map_err(|source| LinkError::CreateDirectory {
                dir: parent.to_path_buf(),
                source,
            })?;
        Ok(Some(parent.to_path_buf()))
    }
}
