//! Remote file browser - Entry Point
//!
//! Usage: `remote-fs-browser [CONFIG]` where `CONFIG` names an optional
//! TOML file without its extension (default `config`).

use log::{error, info};
use std::process::ExitCode;

use remote_fs_browser::{Server, ServerConfig};

const DEFAULT_CONFIG: &str = "config";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Launching file browser server...");

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Server stopped: {}", e);
    }
    ExitCode::FAILURE
}
