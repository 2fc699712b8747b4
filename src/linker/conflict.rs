//! Handling of destinations that are already occupied.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::LinkError;
use crate::operations::FileSystemOps;

/// Suffix appended to a destination when it is backed up.
pub const BACKUP_SUFFIX: &str = ".bak";

/// What to do with an existing destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Move it to `<destination>.bak`, replacing any older backup.
    Backup,
    /// Delete it.
    Overwrite,
    /// Leave it alone; link creation will then fail.
    Keep,
}

impl ConflictPolicy {
    /// Build the policy from the config flags. Backup wins when both are set.
    #[must_use]
    pub const fn from_flags(backup: bool, overwrite: bool) -> Self {
        if backup {
            Self::Backup
        } else if overwrite {
            Self::Overwrite
        } else {
            Self::Keep
        }
    }
}

/// What [`ConflictResolver::resolve`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The destination was moved to the contained backup path.
    BackedUp(PathBuf),
    /// The destination was removed.
    Removed,
    /// The destination was left in place.
    Kept,
}

/// Applies a [`ConflictPolicy`] to an existing destination.
#[derive(Debug)]
pub struct ConflictResolver<'a> {
    policy: ConflictPolicy,
    fs: &'a dyn FileSystemOps,
}

impl<'a> ConflictResolver<'a> {
    /// Create a resolver applying `policy` through `fs`.
    #[must_use]
    pub const fn new(policy: ConflictPolicy, fs: &'a dyn FileSystemOps) -> Self {
        Self { policy, fs }
    }

    /// Clear `destination` according to the policy.
    ///
    /// Only call this when something occupies `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Backup`] if the stale backup cannot be removed or
    /// the rename fails, and [`LinkError::Removal`] if overwriting fails
    /// (for example on a non-empty directory).
    pub fn resolve(&self, destination: &Path) -> Result<Resolution, LinkError> {
        match self.policy {
            ConflictPolicy::Backup => self.backup(destination).map(Resolution::BackedUp),
            ConflictPolicy::Overwrite => {
                self.fs
                    .remove(destination)
                    .map_err(|source| LinkError::Removal {
                        destination: destination.to_path_buf(),
                        source,
                    })?;
                Ok(Resolution::Removed)
            }
            ConflictPolicy::Keep => Ok(Resolution::Kept),
        }
    }

    fn backup(&self, destination: &Path) -> Result<PathBuf, LinkError> {
        let backup = backup_path(destination);
        let fail = |source| LinkError::Backup {
            destination: destination.to_path_buf(),
            backup: backup.clone(),
            source,
        };
        // Last backup wins.
        if self.fs.entry_exists(&backup) {
            self.fs.remove(&backup).map_err(fail)?;
        }
        self.fs.rename(destination, &backup).map_err(fail)?;
        Ok(backup)
    }
}

/// `destination` with [`BACKUP_SUFFIX`] appended to its final component.
#[must_use]
pub fn backup_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::operations::SystemFileSystemOps;

    #[test]
    fn backup_takes_precedence_over_overwrite() {
        assert_eq!(ConflictPolicy::from_flags(true, true), ConflictPolicy::Backup);
        assert_eq!(ConflictPolicy::from_flags(true, false), ConflictPolicy::Backup);
        assert_eq!(
            ConflictPolicy::from_flags(false, true),
            ConflictPolicy::Overwrite
        );
        assert_eq!(ConflictPolicy::from_flags(false, false), ConflictPolicy::Keep);
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/home/user/.vimrc")),
            PathBuf::from("/home/user/.vimrc.bak")
        );
        assert_eq!(
            backup_path(Path::new("/home/user/notes.txt")),
            PathBuf::from("/home/user/notes.txt.bak")
        );
    }

    #[test]
    fn backup_moves_destination_aside() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".vimrc");
        std::fs::write(&destination, "original").unwrap();
        let fs = SystemFileSystemOps;
        let resolution = ConflictResolver::new(ConflictPolicy::Backup, &fs)
            .resolve(&destination)
            .unwrap();
        let backup = dir.path().join(".vimrc.bak");
        assert_eq!(resolution, Resolution::BackedUp(backup.clone()));
        assert!(!destination.exists());
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "original");
    }

    #[test]
    fn backup_replaces_previous_backup() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".vimrc");
        let backup = dir.path().join(".vimrc.bak");
        std::fs::write(&destination, "new").unwrap();
        std::fs::write(&backup, "old").unwrap();
        let fs = SystemFileSystemOps;
        ConflictResolver::new(ConflictPolicy::Backup, &fs)
            .resolve(&destination)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "new");
        assert!(!dir.path().join(".vimrc.bak.bak").exists());
    }

    #[test]
    fn unremovable_stale_backup_is_backup_error() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".config");
        let backup = dir.path().join(".config.bak");
        std::fs::write(&destination, "x").unwrap();
        std::fs::create_dir(&backup).unwrap();
        std::fs::write(backup.join("keep"), "x").unwrap();
        let fs = SystemFileSystemOps;
        let err = ConflictResolver::new(ConflictPolicy::Backup, &fs)
            .resolve(&destination)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Backup);
        assert!(destination.exists(), "destination must stay in place");
    }

    #[test]
    fn overwrite_removes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".vimrc");
        std::fs::write(&destination, "original").unwrap();
        let fs = SystemFileSystemOps;
        let resolution = ConflictResolver::new(ConflictPolicy::Overwrite, &fs)
            .resolve(&destination)
            .unwrap();
        assert_eq!(resolution, Resolution::Removed);
        assert!(!destination.exists());
    }

    #[test]
    fn overwrite_refuses_non_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".config");
        std::fs::create_dir(&destination).unwrap();
        std::fs::write(destination.join("settings"), "x").unwrap();
        let fs = SystemFileSystemOps;
        let err = ConflictResolver::new(ConflictPolicy::Overwrite, &fs)
            .resolve(&destination)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Removal);
        assert!(destination.join("settings").exists());
    }

    #[test]
    fn keep_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(".vimrc");
        std::fs::write(&destination, "original").unwrap();
        let fs = SystemFileSystemOps;
        let resolution = ConflictResolver::new(ConflictPolicy::Keep, &fs)
            .resolve(&destination)
            .unwrap();
        assert_eq!(resolution, Resolution::Kept);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "original");
    }
}
