//! Error types
//!
//! Defines domain-specific error types for each module of the file browser.

use std::fmt;
use std::io;

/// Storage module errors
///
/// The `String` payload is always the argument as the client typed it, so the
/// error can be echoed back without leaking real filesystem paths.
#[derive(Debug)]
pub enum StorageError {
    PathTraversal(String),
    FileNotFound(String),
    NotAFile(String),
    NotADirectory(String),
    AlreadyExists(String),
    IoError(String, io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathTraversal(p) => write!(f, "Path escapes sandbox root: {}", p),
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::NotAFile(p) => write!(f, "Not a regular file: {}", p),
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            StorageError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            StorageError::IoError(p, e) => write!(f, "IO error on {}: {}", p, e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Navigate module errors
#[derive(Debug)]
pub enum NavigateError {
    PathTraversal(String),
    DirectoryNotFound(String),
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::PathTraversal(p) => write!(f, "Path escapes sandbox root: {}", p),
            NavigateError::DirectoryNotFound(p) => write!(f, "Directory not found: {}", p),
        }
    }
}

impl std::error::Error for NavigateError {}

impl From<StorageError> for NavigateError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::PathTraversal(p) => NavigateError::PathTraversal(p),
            StorageError::FileNotFound(p)
            | StorageError::NotAFile(p)
            | StorageError::NotADirectory(p)
            | StorageError::AlreadyExists(p)
            | StorageError::IoError(p, _) => NavigateError::DirectoryNotFound(p),
        }
    }
}

/// Errors fatal to the whole server process
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    SandboxRoot(io::Error),
    Bind { addr: String, source: io::Error },
    Listener(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::SandboxRoot(e) => write!(f, "Cannot prepare sandbox root: {}", e),
            ServerError::Bind { addr, source } => {
                write!(f, "Failed to bind to {}: {}", addr, source)
            }
            ServerError::Listener(e) => write!(f, "Listener failure: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::SandboxRoot(e) => Some(e),
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Listener(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}
