//! Expense Splitter CLI
//!
//! Interactive command-line tool for splitting shared expenses among a group.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --save trip.csv
//! cargo run -- --load previous.csv --import-mode merge
//! cargo run -- --strategy async --policy carry-forward
//! ```
//!
//! The program asks for the group's names and expenses on stdin, prints how
//! the bill was split, saves everyone's balances to a CSV file and finally
//! loads a balances file and prints its contents.
//!
//! Set `RUST_LOG` (for example `RUST_LOG=debug`) to see diagnostics on stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input closed early, save file not writable, etc.)

use expense_splitter::cli;
use expense_splitter::logging;
use std::io;
use std::process;

fn main() {
    logging::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let config = args.to_session_config();

    let stdin = io::stdin();
    let mut session = cli::Session::new(stdin.lock(), io::stdout(), config);

    if let Err(e) = session.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
