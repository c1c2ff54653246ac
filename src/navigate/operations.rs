//! Navigation operations implementation

use std::path::{Component, Path};

use crate::error::NavigateError;
use crate::storage::{SandboxPath, SandboxRoot};

/// Computes a session's next current directory.
///
/// `None` returns to the root. At the root, a target made only of `..` and
/// `.` segments (`..`, `../`, `./..`, `../..`) stays at the root. Any other
/// target must resolve inside the sandbox to an existing directory.
pub fn change_directory(
    root: &SandboxRoot,
    cwd: &SandboxPath,
    target: Option<&str>,
) -> Result<SandboxPath, NavigateError> {
    let target = match target {
        None => return Ok(SandboxPath::root()),
        Some(target) if cwd.is_root() && climbs_only(target) => return Ok(SandboxPath::root()),
        Some(target) => target,
    };

    let resolved = root.resolve(cwd, target)?;

    if !resolved.real_path.is_dir() {
        return Err(NavigateError::DirectoryNotFound(target.to_string()));
    }

    Ok(resolved.virtual_path)
}

/// True for targets like `..`, `../` or `./../..`
fn climbs_only(target: &str) -> bool {
    let mut climbs = false;
    for component in Path::new(target).components() {
        match component {
            Component::ParentDir => climbs = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    climbs
}
