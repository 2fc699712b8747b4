//! Declarative symlink manager for dotfiles.
//!
//! A `dotlink.yaml` in the managed root maps source paths (relative to the
//! root) to destinations (absolute or `~`-rooted). Each entry is resolved,
//! checked against structural guards, given a parent directory if allowed,
//! cleared by backup or overwrite if occupied, and finally linked.
//!
//! - **[`config`]**: the mapping and its YAML/TOML file
//! - **[`linker`]**: path resolution, guards, provisioning, conflict handling and the engine
//! - **[`operations`]**: the filesystem surface the engine works through
//! - **[`commands`]**: the CLI entry points built on top
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod linker;
pub mod logging;
pub mod operations;
