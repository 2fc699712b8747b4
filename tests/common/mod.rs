// Shared helpers for integration tests.
//
// Each context owns two temporary directories: a managed root holding the
// source files and config, and a fake home directory that `~` expands to.
// Nothing touches the real home directory or the process environment.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotlink::commands::CommandSetup;
use dotlink::config::Config;
use dotlink::linker::LinkEngine;
use dotlink::linker::paths::{FixedHome, PathResolver};
use dotlink::logging::Logger;

/// An isolated managed root and home directory.
pub struct IntegrationTestContext {
    /// Managed root containing sources and `dotlink.yaml`.
    pub root: tempfile::TempDir,
    /// Directory `~` expands to.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create empty root and home directories.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create root dir"),
            home: tempfile::tempdir().expect("create home dir"),
        }
    }

    /// Path to the managed root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the fake home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// `<root>/<relative>`.
    pub fn source(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// `<home>/<relative>`.
    pub fn home_file(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    /// Resolver anchored at the managed root with `~` pinned to the fake home.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.root.path(), &FixedHome(self.home.path().to_path_buf()))
    }

    /// Link engine working on the real filesystem inside the temp dirs.
    pub fn engine(&self) -> LinkEngine {
        LinkEngine::new(self.resolver())
    }

    /// Load `dotlink.yaml` (or `.toml`) from the managed root.
    pub fn load_config(&self) -> Config {
        Config::load(self.root.path()).expect("load config")
    }

    /// Run command setup against the managed root, as `dotlink -d <root>` would.
    pub fn setup(&self, log: &Logger) -> anyhow::Result<CommandSetup> {
        let root = self.root.path().display().to_string();
        CommandSetup::init_with(Some(&root), self.resolver(), log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with empty root and home directories.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Create a source file under the managed root.
    pub fn with_source(self, relative: &str, content: &str) -> Self {
        write_file(&self.ctx.source(relative), content);
        self
    }

    /// Create a source directory (with one file in it) under the managed root.
    pub fn with_source_dir(self, relative: &str) -> Self {
        write_file(&self.ctx.source(relative).join("init.lua"), "");
        self
    }

    /// Create a regular file under the fake home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.ctx.home_file(relative), content);
        self
    }

    /// Create a directory under the fake home directory.
    pub fn with_home_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.ctx.home_file(relative)).expect("create home dir");
        self
    }

    /// Write `dotlink.yaml` into the managed root.
    pub fn with_config(self, yaml: &str) -> Self {
        write_file(&self.ctx.source("dotlink.yaml"), yaml);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Build a [`Config`] from flags and `(source, destination)` pairs.
pub fn config(make_dirs: bool, backup: bool, overwrite: bool, paths: &[(&str, &str)]) -> Config {
    Config {
        overwrite,
        make_dirs,
        backup,
        paths: paths
            .iter()
            .map(|(s, d)| ((*s).to_string(), (*d).to_string()))
            .collect(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
