//! Path validation
//!
//! The sandbox boundary. Every path a client names is resolved here against
//! the session's current directory before any filesystem call is made.

use log::warn;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// A directory location relative to the sandbox root.
///
/// Holds only normal components, so it can never point above the root.
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxPath(PathBuf);

impl SandboxPath {
    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final component, or `None` at the root
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

impl fmt::Display for SandboxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        let mut first = true;
        for component in self.0.components() {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{}", component.as_os_str().to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    pub virtual_path: SandboxPath,
    pub real_path: PathBuf,
}

/// The immutable, canonical sandbox root established at startup
#[derive(Debug, Clone)]
pub struct SandboxRoot {
    root: PathBuf,
    name: String,
}

impl SandboxRoot {
    /// Creates the root directory if absent and pins its canonical form
    pub fn open(path: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(path)?;
        let root = path.canonicalize()?;
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string());
        Ok(Self { root, name })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Display name of a session directory; the root's own name at the root
    pub fn display_name(&self, cwd: &SandboxPath) -> String {
        cwd.file_name().unwrap_or_else(|| self.name.clone())
    }

    /// Resolves `arg` against `cwd`, refusing anything outside the root.
    ///
    /// An empty argument resolves to `cwd` itself. Absolute arguments are
    /// refused. `..` may climb back toward the root but never past it.
    /// Existing targets (or the nearest existing ancestor of a new target)
    /// are also canonicalised so that symbolic links cannot lead out.
    pub fn resolve(&self, cwd: &SandboxPath, arg: &str) -> Result<ResolvedPath, StorageError> {
        let virtual_path = normalize(cwd, arg)
            .ok_or_else(|| StorageError::PathTraversal(arg.to_string()))?;
        let real_path = self.root.join(virtual_path.as_path());

        self.check_links(&real_path, arg)?;

        Ok(ResolvedPath {
            virtual_path,
            real_path,
        })
    }

    fn check_links(&self, real_path: &Path, arg: &str) -> Result<(), StorageError> {
        let mut ancestor = Some(real_path);
        while let Some(candidate) = ancestor {
            match candidate.canonicalize() {
                Ok(canonical) if canonical.starts_with(&self.root) => return Ok(()),
                Ok(canonical) => {
                    warn!(
                        "Refused {}: resolves outside sandbox to {}",
                        arg,
                        canonical.display()
                    );
                    return Err(StorageError::PathTraversal(arg.to_string()));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => ancestor = candidate.parent(),
                Err(e) => return Err(StorageError::IoError(arg.to_string(), e)),
            }
        }
        Err(StorageError::PathTraversal(arg.to_string()))
    }
}

/// Lexically joins `arg` onto `cwd`. `None` means the result would escape.
fn normalize(cwd: &SandboxPath, arg: &str) -> Option<SandboxPath> {
    let mut resolved = cwd.as_path().to_path_buf();

    for component in Path::new(arg).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(SandboxPath(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, SandboxRoot) {
        let dir = TempDir::new().unwrap();
        let root = SandboxRoot::open(&dir.path().join("serverdir")).unwrap();
        (dir, root)
    }

    fn at(path: &str) -> SandboxPath {
        normalize(&SandboxPath::root(), path).unwrap()
    }

    #[test]
    fn test_open_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("fresh");
        assert!(!target.exists());

        let root = SandboxRoot::open(&target).unwrap();
        assert!(target.is_dir());
        assert!(root.path().is_absolute());
        assert_eq!(root.display_name(&SandboxPath::root()), "fresh");
    }

    #[test]
    fn test_empty_argument_is_current_directory() {
        let (_dir, root) = sandbox();
        fs::create_dir(root.path().join("docs")).unwrap();

        let resolved = root.resolve(&at("docs"), "").unwrap();
        assert_eq!(resolved.virtual_path, at("docs"));
        assert_eq!(resolved.real_path, root.path().join("docs"));
    }

    #[test]
    fn test_nested_relative_paths_are_accepted() {
        let (_dir, root) = sandbox();

        let resolved = root.resolve(&SandboxPath::root(), "docs/note.txt").unwrap();
        assert_eq!(resolved.virtual_path.to_string(), "/docs/note.txt");

        let resolved = root.resolve(&at("a/b"), "../c/./d").unwrap();
        assert_eq!(resolved.virtual_path.to_string(), "/a/c/d");
    }

    #[test]
    fn test_parent_may_return_to_root() {
        let (_dir, root) = sandbox();
        let resolved = root.resolve(&at("docs"), "..").unwrap();
        assert!(resolved.virtual_path.is_root());
        assert_eq!(resolved.real_path, root.path());
    }

    #[test]
    fn test_escapes_are_rejected() {
        let (_dir, root) = sandbox();
        let cases = [
            (SandboxPath::root(), ".."),
            (SandboxPath::root(), "../serverdir"),
            (at("docs"), "../.."),
            (at("a/b"), "../../../etc/passwd"),
            (at("docs"), "x/../../../y"),
            (SandboxPath::root(), "/etc/passwd"),
            (at("docs"), "/"),
        ];

        for (cwd, arg) in cases {
            match root.resolve(&cwd, arg) {
                Err(StorageError::PathTraversal(p)) => assert_eq!(p, arg),
                other => panic!("{} from {} should escape, got {:?}", arg, cwd, other),
            }
        }
    }

    #[test]
    fn test_resolution_never_leaves_root() {
        let (_dir, root) = sandbox();
        let cwds = [at(""), at("a"), at("a/b"), at("a/b/c")];
        let args = [
            "", ".", "..", "../..", "x", "x/..", "x/../..", "./../x", "a/b/../../..",
            "../../../..", "../a/../..",
        ];

        for cwd in &cwds {
            for arg in args {
                if let Ok(resolved) = root.resolve(cwd, arg) {
                    assert!(resolved.real_path.starts_with(root.path()));
                    assert!(
                        resolved
                            .virtual_path
                            .as_path()
                            .components()
                            .all(|c| matches!(c, Component::Normal(_)))
                    );
                }
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_sandbox_is_rejected() {
        let (dir, root) = sandbox();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(&outside, root.path().join("link")).unwrap();

        assert!(matches!(
            root.resolve(&SandboxPath::root(), "link/secret.txt"),
            Err(StorageError::PathTraversal(_))
        ));
        assert!(matches!(
            root.resolve(&SandboxPath::root(), "link/new.txt"),
            Err(StorageError::PathTraversal(_))
        ));
    }

    #[test]
    fn test_display_of_sandbox_path() {
        assert_eq!(SandboxPath::root().to_string(), "/");
        assert_eq!(at("docs/sub").to_string(), "/docs/sub");
    }
}
