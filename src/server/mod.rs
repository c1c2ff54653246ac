//! Server core functionality
//!
//! The event loop and its configuration.

pub mod config;
pub mod core;

pub use self::config::ServerConfig;
pub use self::core::Server;
