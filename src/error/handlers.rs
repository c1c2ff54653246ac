//! Error handlers
//!
//! Converts per-command failures into the fixed response lines clients see.

use crate::error::types::{NavigateError, StorageError};
use crate::protocol::responses;

/// Errors that can be reported back over the connection
pub enum CommandError<'a> {
    Storage(&'a StorageError),
    Navigate(&'a NavigateError),
}

impl<'a> From<&'a StorageError> for CommandError<'a> {
    fn from(error: &'a StorageError) -> Self {
        CommandError::Storage(error)
    }
}

impl<'a> From<&'a NavigateError> for CommandError<'a> {
    fn from(error: &'a NavigateError) -> Self {
        CommandError::Navigate(error)
    }
}

/// Convert an error into its response message, terminator included
pub fn error_to_response<'a>(err: impl Into<CommandError<'a>>) -> String {
    let text = match err.into() {
        CommandError::Storage(e) => match e {
            StorageError::PathTraversal(arg) => format!("Invalid path : {}", arg),
            StorageError::FileNotFound(arg) => format!("File {} not found", arg),
            StorageError::NotAFile(arg) => format!("{} is not a file", arg),
            StorageError::NotADirectory(arg) => format!("Invalid directory : {}", arg),
            StorageError::AlreadyExists(arg) => format!("{} already exist", arg),
            StorageError::IoError(arg, _) => format!("Operation failed : {}", arg),
        },
        CommandError::Navigate(e) => match e {
            NavigateError::PathTraversal(arg) => format!("Invalid path : {}", arg),
            NavigateError::DirectoryNotFound(arg) => format!("Invalid directory : {}", arg),
        },
    };
    responses::paragraph(&text)
}
