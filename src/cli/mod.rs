// CLI module
// Command-line arguments and the interactive session

mod args;
mod session;

pub use args::{ImportModeType, PolicyType, SessionArgs, StrategyType};
pub use session::{split_names, Session, SessionConfig};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints a message and exits the
/// process.
pub fn parse_args() -> SessionArgs {
    SessionArgs::parse()
}
