use std::path::PathBuf;

use crate::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Root directory for relocated character images. When unset the server
    /// creates a temporary media root that is removed on shutdown.
    pub media_root: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => validate_listen_addr(raw)?,
            Err(_) => "0.0.0.0:8080".to_string(),
        };

        Ok(Self {
            database_url: require_var("DATABASE_URL")?,
            listen_addr,
            media_root: std::env::var("MEDIA_ROOT").ok().map(PathBuf::from),
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn validate_listen_addr(raw: String) -> Result<String, ConfigError> {
    raw.parse::<std::net::SocketAddr>()
        .map_err(|err| ConfigError::InvalidEnvValue {
            var: "LISTEN_ADDR".to_string(),
            reason: err.to_string(),
        })?;

    Ok(raw)
}
