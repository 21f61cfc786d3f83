//! CLI command implementations
//!
//! `serve` boot order: resolve config, install logging, open the store,
//! build the server, run until a shutdown signal, flush the store.

use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability;

use super::args::Command;
use super::errors::CliResult;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(config.as_deref(), &mut io::stdout().lock()),
    }
}

/// Start the HTTP API and block until shutdown.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = resolve(config_path, port)?;

    if !observability::init(config.log_format, &config.log_level) {
        warn!("tracing subscriber already installed; keeping it");
    }
    info!(
        store = ?config.store,
        data_dir = %config.data_dir.display(),
        addr = %config.http.bind_address(),
        "starting catering API"
    );

    let store = config.open_store()?;
    let server = HttpServer::with_config(config.http.clone(), store.clone());

    let rt = tokio::runtime::Runtime::new()?;
    let served = rt.block_on(server.serve(shutdown_signal()));

    // flush even when serving failed, then report the serve error first
    let flushed = store.flush();
    served?;
    flushed?;

    info!("store flushed, exiting");
    Ok(())
}

/// Load and validate configuration, then print it as resolved.
pub fn check_config<W: Write>(config_path: Option<&Path>, out: &mut W) -> CliResult<()> {
    let config = resolve(config_path, None)?;
    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}

fn resolve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<ServiceConfig> {
    let mut config = ServiceConfig::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliError;

    #[test]
    fn test_check_config_prints_resolved_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catering.json");
        std::fs::write(&path, r#"{"port": 9300, "store": "memory"}"#).unwrap();

        let mut out = Vec::new();
        check_config(Some(&path), &mut out).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["store"], "memory");
        assert_eq!(printed["host"], "0.0.0.0");
        assert!(printed["cors_origins"].is_array());
    }

    #[test]
    fn test_check_config_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catering.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = check_config(Some(&path), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_port_override_is_validated() {
        let err = resolve(None, Some(0)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
