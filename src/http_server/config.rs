//! Listener and CORS settings of the HTTP API.
//!
//! Flattened into `ServiceConfig`, so the keys sit at the top level of the
//! config file: `host`, `port`, `cors_origins`. Missing keys take defaults.

use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Origins of the browser front ends allowed by default.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:8080"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// `host:port` as configured, for logs.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The address to bind; the host must be an IP literal.
    pub fn resolve(&self) -> io::Result<SocketAddr> {
        self.bind_address().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {}: {}", self.bind_address(), e),
            )
        })
    }

    /// CORS layer for the configured origins. Unparseable origins are
    /// skipped with a warning.
    pub fn cors_layer(&self) -> CorsLayer {
        let allow_origin = if self.cors_origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(self.cors_origins.iter().filter_map(|origin| {
                origin
                    .parse()
                    .map_err(|_| warn!(%origin, "ignoring unparseable CORS origin"))
                    .ok()
            }))
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
