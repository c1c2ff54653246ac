//! Server configuration
//!
//! Loads settings from an optional `config.toml` with `RFB_*` environment
//! overrides, falling back to built-in defaults.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ServerError;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8188;
const DEFAULT_SERVER_ROOT: &str = "serverdir";
const DEFAULT_READ_CHUNK_SIZE: usize = 1024;
const DEFAULT_MAX_LINE_LENGTH: usize = 1024;
const DEFAULT_BIND_RETRIES: u32 = 3;
const DEFAULT_BIND_RETRY_DELAY_MS: u64 = 500;

/// Server configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the listener binds to
    pub bind_address: String,

    /// TCP port of the listener
    pub port: u16,

    /// Sandbox root directory; created on startup if absent
    pub server_root: PathBuf,

    /// Size of each non-blocking read while draining a socket
    pub read_chunk_size: usize,

    /// Longest command line accepted before the input is discarded
    pub max_line_length: usize,

    /// Extra bind attempts made at startup before giving up
    pub bind_retries: u32,
    pub bind_retry_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            server_root: PathBuf::from(DEFAULT_SERVER_ROOT),
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            bind_retries: DEFAULT_BIND_RETRIES,
            bind_retry_delay_ms: DEFAULT_BIND_RETRY_DELAY_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `<path>.toml` (optional) with environment overrides
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("server_root", DEFAULT_SERVER_ROOT)?
            .set_default("read_chunk_size", DEFAULT_READ_CHUNK_SIZE as i64)?
            .set_default("max_line_length", DEFAULT_MAX_LINE_LENGTH as i64)?
            .set_default("bind_retries", i64::from(DEFAULT_BIND_RETRIES))?
            .set_default("bind_retry_delay_ms", DEFAULT_BIND_RETRY_DELAY_MS as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("RFB"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.server_root.as_os_str().is_empty() {
            return Err(ConfigError::Message("server_root cannot be empty".into()));
        }

        if self.read_chunk_size == 0 {
            return Err(ConfigError::Message(
                "read_chunk_size must be greater than 0".into(),
            ));
        }

        if self.max_line_length == 0 {
            return Err(ConfigError::Message(
                "max_line_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn bind_retry_delay(&self) -> Duration {
        Duration::from_millis(self.bind_retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_socket(), "127.0.0.1:8188");
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_root() {
        let config = ServerConfig {
            server_root: PathBuf::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let config = ServerConfig {
            read_chunk_size: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            max_line_length: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.toml"), "port = 0\n").unwrap();

        let path = dir.path().join("bad");
        let result = ServerConfig::load(path.to_str().unwrap());
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn test_load_reads_file_values() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("custom.toml"),
            "port = 9100\nserver_root = \"browse\"\n",
        )
        .unwrap();

        let path = dir.path().join("custom");
        let config = ServerConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.server_root, PathBuf::from("browse"));
        assert_eq!(config.max_line_length, 1024);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ServerConfig::load("definitely-not-a-config-file").unwrap();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.read_chunk_size, 1024);
    }
}
