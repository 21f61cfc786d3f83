//! CLI argument definitions using clap
//!
//! Commands:
//! - catering serve [--config <path>] [--port <port>]
//! - catering check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Catering record-management API
#[derive(Parser, Debug)]
#[command(name = "catering")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and environment
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and print it as resolved
    CheckConfig {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_without_flags() {
        let cli = Cli::try_parse_from(["catering", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve {
                config: None,
                port: None
            }
        ));
    }

    #[test]
    fn test_serve_with_flags() {
        let cli =
            Cli::try_parse_from(["catering", "serve", "--config", "c.json", "--port", "9000"])
                .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, Some(PathBuf::from("c.json")));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_check_config_subcommand_name() {
        let cli = Cli::try_parse_from(["catering", "check-config"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig { config: None }));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["catering"]).is_err());
    }
}
