//! `dotlink` binary: parse flags, set up logging, dispatch.
use anyhow::Result;
use clap::Parser as _;

use dotlink::{cli::Cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.command_name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    if args.watch {
        commands::watch::run(&args, &log)
    } else {
        commands::link::run(&args, &log)
    }
}
