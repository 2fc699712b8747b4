//! Command-line interface.
use clap::Parser;

/// Version reported by `--version`: `DOTLINK_VERSION` at build time, else the
/// crate version.
pub const VERSION: &str = match option_env!("DOTLINK_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Declarative symlink manager for dotfiles.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Link dotfiles into place from a dotlink.yaml mapping",
    version = VERSION
)]
pub struct Cli {
    /// Directory containing dotlink.yaml (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Watch the directory and relink on changes (not yet implemented)
    #[arg(short, long)]
    pub watch: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Name used for the log file of this invocation.
    #[must_use]
    pub const fn command_name(&self) -> &'static str {
        if self.watch { "watch" } else { "link" }
    }
}
