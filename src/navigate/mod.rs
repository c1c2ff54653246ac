//! Navigate module
//!
//! Handles `cd` for a session's current directory.

mod operations;

// Re-export public types and functions
pub use operations::change_directory;
