//! Command handlers invoked from `main`.
pub mod link;
pub mod watch;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::{Cli, VERSION};
use crate::config::{Config, loader};
use crate::linker::paths::{PathResolver, SystemHomeDir};
use crate::logging::Logger;

/// Managed root plus the configuration found in it.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolver anchored at the managed root.
    pub resolver: PathResolver,
    /// Parsed configuration.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the managed root from `cli` and load its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable, the root
    /// does not exist, or the configuration cannot be loaded.
    pub fn init(cli: &Cli, log: &Logger) -> Result<Self> {
        let cwd = std::env::current_dir().context("unable to get current working directory")?;
        Self::init_with(cli.dir.as_deref(), PathResolver::new(cwd, &SystemHomeDir), log)
    }

    /// Same as [`init`](Self::init) with the working directory and home
    /// directory already captured in `resolver`.
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn init_with(dir: Option<&str>, resolver: PathResolver, log: &Logger) -> Result<Self> {
        log.info(&format!("dotlink {VERSION}"));

        let root = resolve_root(dir, &resolver)?;
        log.debug(&format!("managed root: {}", root.display()));
        let resolver = resolver.with_root(root);

        log.stage("Loading configuration");
        let (path, config) = loader::load(resolver.root())
            .with_context(|| format!("loading configuration from {}", resolver.root().display()))?;
        log.info(&format!(
            "loaded {} path(s) from {}",
            config.len(),
            path.display()
        ));
        log.debug(&format!(
            "make-dirs: {}, backup-existing: {}, overwrite-existing: {}",
            config.make_dirs, config.backup, config.overwrite
        ));

        Ok(Self { resolver, config })
    }
}

/// Pick the managed root: `dir` (home-expanded and anchored at the
/// resolver's root) when given, else the resolver's root itself.
///
/// # Errors
///
/// Returns an error if `dir` needs an unknown home directory, does not exist,
/// or is not a directory.
pub fn resolve_root(dir: Option<&str>, resolver: &PathResolver) -> Result<PathBuf> {
    let Some(dir) = dir else {
        return Ok(resolver.root().to_path_buf());
    };
    let path = resolver.resolve(dir)?;
    if !path.is_dir() {
        anyhow::bail!("directory {} does not exist", path.display());
    }
    dunce::canonicalize(&path).with_context(|| format!("unable to resolve {}", path.display()))
}
