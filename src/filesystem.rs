//! On-disk helpers for working copies
//!
//! Working copies live in uniquely named temporary directories below the
//! `src` anchor of a session directory we allocated ourselves. When a working
//! copy is destroyed its directory is removed and the chain of ancestors it
//! leaves empty is pruned. Pruning never removes a directory named `src`;
//! that name anchors both sessions and vendored trees and must survive even
//! when empty.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Directory name that pruning never removes.
pub const PROTECTED_DIR: &str = "src";

/// Prefix for every temporary directory we allocate.
pub const TEMP_PREFIX: &str = "vendor-fetch-";

/// Version control metadata directories that are never vendored.
pub const VCS_DIRS: [&str; 3] = [".git", ".hg", ".bzr"];

/// Creates a fresh, uniquely named directory under `root`.
///
/// The directory is handed to the caller and is not removed on drop; the
/// caller owns it until it is explicitly removed.
pub fn make_temp_dir(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root).map_err(|e| Error::filesystem(root, e))?;
    let dir = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempdir_in(root)
        .map_err(|e| Error::filesystem(root, e))?;
    let path = dir.keep();
    debug!("allocated temporary directory {}", path.display());
    Ok(path)
}

/// Allocates a session directory under `root` with an empty `src` anchor.
///
/// Returns `(session, anchor)`. The session is ours to remove; `root` is not.
pub fn make_session_dir(root: &Path) -> Result<(PathBuf, PathBuf)> {
    let session = make_temp_dir(root)?;
    let anchor = session.join(PROTECTED_DIR);
    if let Err(e) = fs::create_dir(&anchor) {
        let err = Error::filesystem(&anchor, e);
        if let Err(cleanup) = remove_tree(&session) {
            warn!("failed to clean up {}: {}", session.display(), cleanup);
        }
        return Err(err);
    }
    Ok((session, anchor))
}

/// Recursively removes `path`. A path that is already gone is not an error.
pub fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::filesystem(path, e)),
    }
}

/// Walks upward from `start`, removing each directory that is empty.
///
/// Stops at the first directory that still has entries, no longer exists,
/// is named [`PROTECTED_DIR`], or has no name (the filesystem root or an
/// exhausted relative path). Symlinked ancestors are followed as-is.
pub fn prune_empty_ancestors(start: &Path) -> Result<()> {
    let mut current = Some(start);
    while let Some(dir) = current {
        match dir.file_name() {
            Some(name) if name != PROTECTED_DIR => {}
            _ => break,
        }

        let mut entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => break,
            Err(e) => return Err(Error::filesystem(dir, e)),
        };
        if entries.next().is_some() {
            break;
        }

        if !remove_if_empty(dir)? {
            break;
        }
        debug!("pruned empty directory {}", dir.display());
        current = dir.parent();
    }
    Ok(())
}

/// Removes `dir` if it is empty. Returns `false` when it gained entries or
/// vanished since it was inspected.
fn remove_if_empty(dir: &Path) -> Result<bool> {
    match fs::remove_dir(dir) {
        Ok(()) => Ok(true),
        Err(e) if matches!(e.kind(), ErrorKind::DirectoryNotEmpty | ErrorKind::NotFound) => {
            Ok(false)
        }
        Err(e) => Err(Error::filesystem(dir, e)),
    }
}

/// Copies the tree rooted at `src` into `dst`, leaving out version control
/// metadata directories. Symlinks are recreated with their original target.
/// Returns the number of files and links copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(Error::Filesystem {
            path: src.display().to_string(),
            message: "not a directory".to_string(),
        });
    }

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_vcs_dir(e.file_name())));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Filesystem {
            path: src.display().to_string(),
            message: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::Filesystem {
                path: entry.path().display().to_string(),
                message: e.to_string(),
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::filesystem(&target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| Error::filesystem(&target, e))?;
            copied += 1;
        } else if entry.file_type().is_symlink() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
            }
            copy_symlink(entry.path(), &target)?;
            copied += 1;
        } else {
            return Err(Error::Filesystem {
                path: entry.path().display().to_string(),
                message: "unsupported file type".to_string(),
            });
        }
    }
    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link).map_err(|e| Error::filesystem(link, e))?;
    std::os::unix::fs::symlink(&points_to, target).map_err(|e| Error::filesystem(target, e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, _target: &Path) -> Result<()> {
    Err(Error::Filesystem {
        path: link.display().to_string(),
        message: "symlinks cannot be vendored on this platform".to_string(),
    })
}

fn is_vcs_dir(name: &std::ffi::OsStr) -> bool {
    VCS_DIRS.iter().any(|d| name == *d)
}
