//! `--watch`: placeholder for relinking on changes.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::Cli;
use crate::logging::Logger;

/// Validate the root and configuration, then report that watching is not
/// available.
///
/// # Errors
///
/// Returns an error if setup fails.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(cli, log)?;
    execute(&setup, log)
}

/// Report that watching is not available. Nothing is linked.
///
/// # Errors
///
/// Currently always succeeds.
pub fn execute(setup: &CommandSetup, log: &Logger) -> Result<()> {
    log.debug(&format!(
        "would watch {} for changes",
        setup.resolver.root().display()
    ));
    log.warn("'watch' is not yet implemented");
    Ok(())
}
