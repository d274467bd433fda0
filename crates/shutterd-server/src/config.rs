// ABOUTME: Configuration loading for the shutterd server.
// ABOUTME: Reads environment variables with CLI overrides and resolves the default bind address.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::net;

/// Port used when no bind address is configured and the daemon falls back
/// to its discovered local IP.
const DEFAULT_PORT: u16 = 8000;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SHUTTERD_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("failed to discover a local address to bind: {0}")]
    NoLocalAddress(#[from] std::io::Error),
}

/// Server configuration assembled from environment variables and optional
/// CLI overrides.
#[derive(Debug, Clone)]
pub struct ShutterdConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
}

impl ShutterdConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - SHUTTERD_HOME: data root holding `image-captures/` and `logs/`
    ///   (default: `..`, the parent of the working directory)
    /// - SHUTTERD_BIND: socket address to bind; when unset the daemon binds
    ///   its discovered local IP on port 8000
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None, None)
    }

    /// Same as [`from_env`](Self::from_env), with CLI overrides taking
    /// precedence over the environment. Local-IP discovery only runs when
    /// nothing supplies a bind address.
    pub fn from_env_with(
        bind_override: Option<SocketAddr>,
        home_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let home = home_override.unwrap_or_else(|| {
            std::env::var("SHUTTERD_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".."))
        });

        let bind = match bind_override {
            Some(addr) => addr,
            None => match std::env::var("SHUTTERD_BIND") {
                Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidBind(raw))?,
                Err(_) => SocketAddr::new(net::local_ip()?, DEFAULT_PORT),
            },
        };

        Ok(Self { home, bind })
    }
}
