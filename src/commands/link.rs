//! Default command: link every configured path.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::Cli;
use crate::linker::LinkEngine;
use crate::logging::{Logger, SummaryCounts};

/// Run the default command: link every configured path.
///
/// # Errors
///
/// Returns an error if setup fails or any entry failed to link.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(cli, log)?;
    execute(setup, log).map(|_| ())
}

/// Link every entry of an initialised setup and print the summary.
///
/// # Errors
///
/// Returns an error naming the number of failed entries, after all entries
/// have been processed.
pub fn execute(setup: CommandSetup, log: &Logger) -> Result<SummaryCounts> {
    let CommandSetup { resolver, config } = setup;

    log.stage("Linking");
    let engine = LinkEngine::new(resolver);
    let results = engine.link_all(&config);

    let counts = log.print_summary(&results);
    if counts.failed > 0 {
        anyhow::bail!("{} link(s) failed", counts.failed);
    }
    Ok(counts)
}
