//! Storage operations
//!
//! Filesystem work behind `ls`, `cat`, `mkdir` and `touch`. Every function
//! takes the client argument verbatim and resolves it through
//! [`SandboxRoot::resolve`] before touching the disk.

use log::info;
use std::fs::{self, OpenOptions};
use std::io;

use crate::error::StorageError;
use crate::storage::validation::{SandboxPath, SandboxRoot};

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
}

/// Lists a directory; `arg` empty means the current directory.
///
/// Entries come back in whatever order the filesystem yields them.
pub fn list_directory(
    root: &SandboxRoot,
    cwd: &SandboxPath,
    arg: &str,
) -> Result<Vec<DirEntryInfo>, StorageError> {
    let resolved = root.resolve(cwd, arg)?;

    if !resolved.real_path.is_dir() {
        return Err(StorageError::NotADirectory(arg.to_string()));
    }

    let entries = fs::read_dir(&resolved.real_path)
        .map_err(|e| StorageError::IoError(arg.to_string(), e))?;

    let mut listing = Vec::new();
    for entry in entries.flatten() {
        listing.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.path().is_dir(),
        });
    }

    info!(
        "Listed directory {} - {} entries",
        resolved.virtual_path,
        listing.len()
    );
    Ok(listing)
}

/// Reads a whole file
pub fn read_file(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> Result<Vec<u8>, StorageError> {
    let resolved = root.resolve(cwd, arg)?;

    let metadata = match fs::metadata(&resolved.real_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::FileNotFound(arg.to_string()));
        }
        Err(e) => return Err(StorageError::IoError(arg.to_string(), e)),
    };

    if !metadata.is_file() {
        return Err(StorageError::NotAFile(arg.to_string()));
    }

    fs::read(&resolved.real_path).map_err(|e| StorageError::IoError(arg.to_string(), e))
}

/// Creates one directory level; the parent must already exist
pub fn make_directory(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> Result<(), StorageError> {
    let resolved = root.resolve(cwd, arg)?;

    match fs::create_dir(&resolved.real_path) {
        Ok(()) => {
            info!("Created directory {}", resolved.virtual_path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(StorageError::AlreadyExists(arg.to_string()))
        }
        Err(e) => Err(StorageError::IoError(arg.to_string(), e)),
    }
}

/// Creates an empty file, failing if anything already exists at the target
pub fn create_file(root: &SandboxRoot, cwd: &SandboxPath, arg: &str) -> Result<(), StorageError> {
    let resolved = root.resolve(cwd, arg)?;

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&resolved.real_path)
    {
        Ok(_) => {
            info!("Created file {}", resolved.virtual_path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(StorageError::AlreadyExists(arg.to_string()))
        }
        Err(e) => Err(StorageError::IoError(arg.to_string(), e)),
    }
}
