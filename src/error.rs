//! Domain-specific error types for the link engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The linker and config loader return typed errors ([`LinkError`],
//! [`ConfigError`]) while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! LinkError  : one failed entry; never aborts the run
//! ├── Resolution / InvalidEntry         : path could not be resolved
//! ├── RootViolation / NotFound          : source guards
//! ├── SameLocation / ParentConflict / HomeGuard: structural guards
//! ├── MissingDirectory                  : parent directory provisioning
//! ├── Backup / Removal                  : conflict resolution
//! └── AlreadyExists / SymlinkCreation   : the link itself
//!
//! ConfigError: loading dotlink.yaml / dotlink.toml; fatal for the run
//! ```
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Classification of a failed entry, independent of the paths involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The home directory could not be determined.
    Resolution,
    /// The entry has an empty source or destination.
    InvalidEntry,
    /// The source is absolute or home-rooted instead of relative to the managed root.
    RootViolation,
    /// The source does not exist.
    NotFound,
    /// Source and destination resolve to the same path.
    SameLocation,
    /// The destination is an ancestor directory of the source.
    ParentConflict,
    /// The destination is the home directory itself.
    HomeGuard,
    /// The destination's parent directory is missing (or could not be created).
    MissingDirectory,
    /// The destination is occupied and no replacement policy is enabled.
    AlreadyExists,
    /// Moving the existing destination to its `.bak` path failed.
    Backup,
    /// Removing the existing destination failed.
    Removal,
    /// The symlink could not be created.
    SymlinkCreation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resolution => "resolution",
            Self::InvalidEntry => "invalid-entry",
            Self::RootViolation => "root-violation",
            Self::NotFound => "not-found",
            Self::SameLocation => "same-location",
            Self::ParentConflict => "parent-conflict",
            Self::HomeGuard => "home-guard",
            Self::MissingDirectory => "missing-directory",
            Self::AlreadyExists => "already-exists",
            Self::Backup => "backup",
            Self::Removal => "removal",
            Self::SymlinkCreation => "symlink-creation",
        };
        f.write_str(name)
    }
}

/// Why a single mapping entry could not be linked.
#[derive(Error, Debug)]
pub enum LinkError {
    /// A home-rooted path was given but the home directory is unknown.
    #[error("unable to resolve {path}: home directory could not be determined")]
    Resolution {
        /// The raw path that needed the home directory.
        path: String,
    },

    /// The source or destination is empty.
    #[error("invalid entry: {reason}")]
    InvalidEntry {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// The source path is absolute or home-rooted.
    #[error(
        "absolute path found: {path} (source files should exist in the managed root or the directory passed in with '-d')"
    )]
    RootViolation {
        /// The raw source path.
        path: String,
    },

    /// The source path does not exist.
    #[error("unable to link {path}: file does not exist")]
    NotFound {
        /// The raw source path.
        path: String,
    },

    /// Source and destination are the same path.
    #[error("source and destination file cannot be the same: {}", .path.display())]
    SameLocation {
        /// The shared resolved path.
        path: PathBuf,
    },

    /// The destination is a parent directory of the source.
    #[error(
        "unable to symlink {} to {}: {} is a parent of {}",
        .source_path.display(),
        .destination.display(),
        .destination.display(),
        .source_path.display()
    )]
    ParentConflict {
        /// Resolved source path.
        source_path: PathBuf,
        /// Resolved destination path.
        destination: PathBuf,
    },

    /// The destination is the home directory.
    #[error(
        "unable to symlink {} to {}: that would nuke your home directory",
        .source_path.display(),
        .destination.display()
    )]
    HomeGuard {
        /// Resolved source path.
        source_path: PathBuf,
        /// Resolved destination path.
        destination: PathBuf,
    },

    /// The parent directory is missing and `make-dirs` is disabled.
    #[error("path {} does not exist: set 'make-dirs' to true to create it", .dir.display())]
    MissingDirectory {
        /// The missing parent directory.
        dir: PathBuf,
    },

    /// Creating the parent directory chain failed.
    #[error("unable to make dirs {}: {source}", .dir.display())]
    CreateDirectory {
        /// The directory that could not be created.
        dir: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination is occupied and neither backup nor overwrite is enabled.
    #[error(
        "unable to link {}: destination already exists (set 'backup-existing' or 'overwrite-existing' to replace it)",
        .destination.display()
    )]
    AlreadyExists {
        /// Resolved destination path.
        destination: PathBuf,
    },

    /// Backing up the existing destination failed.
    #[error("unable to back up {} to {}: {source}", .destination.display(), .backup.display())]
    Backup {
        /// Resolved destination path.
        destination: PathBuf,
        /// Backup path (`destination` + `.bak`).
        backup: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Removing the existing destination failed.
    #[error("unable to overwrite {}: {source}", .destination.display())]
    Removal {
        /// Resolved destination path.
        destination: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink call itself failed.
    #[error(
        "unable to link {} to {}: {source}",
        .source_path.display(),
        .destination.display()
    )]
    SymlinkCreation {
        /// Resolved source path.
        source_path: PathBuf,
        /// Resolved destination path.
        destination: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// The [`FailureKind`] this error reports as.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Resolution { .. } => FailureKind::Resolution,
            Self::InvalidEntry { .. } => FailureKind::InvalidEntry,
            Self::RootViolation { .. } => FailureKind::RootViolation,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::SameLocation { .. } => FailureKind::SameLocation,
            Self::ParentConflict { .. } => FailureKind::ParentConflict,
            Self::HomeGuard { .. } => FailureKind::HomeGuard,
            Self::MissingDirectory { .. } | Self::CreateDirectory { .. } => {
                FailureKind::MissingDirectory
            }
            Self::AlreadyExists { .. } => FailureKind::AlreadyExists,
            Self::Backup { .. } => FailureKind::Backup,
            Self::Removal { .. } => FailureKind::Removal,
            Self::SymlinkCreation { .. } => FailureKind::SymlinkCreation,
        }
    }
}

/// Errors that arise from locating and parsing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists in the managed root.
    #[error("unable to find dotlink.yaml, dotlink.yml or dotlink.toml in {}", .dir.display())]
    NotFound {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// The configuration file could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML/TOML for the expected shape.
    #[error("unable to parse {}: {message}", .path.display())]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },
}
