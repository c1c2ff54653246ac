//! File system storage management
//!
//! Sandboxed path resolution and the filesystem operations built on it.

pub mod operations;
pub mod validation;

pub use operations::{DirEntryInfo, create_file, list_directory, make_directory, read_file};
pub use validation::{ResolvedPath, SandboxPath, SandboxRoot};
