//! CLI module for the catering service
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP API until shutdown
//! - check-config: Resolve and validate configuration, print it, exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
