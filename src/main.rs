//! Catering CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`; on failure prints the
//! error to stderr and exits non-zero. All other logic lives in the CLI
//! module.

use catering::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
