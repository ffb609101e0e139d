//! Inspection of clone destinations

use std::path::Path;

use git2::Repository;

use crate::{Error, Result};

/// What currently occupies a clone destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Nothing there yet
    Missing,
    /// An empty directory; git can clone into it
    EmptyDir,
    /// A git repository, regular or bare
    Repository,
    /// Something else that a clone would collide with
    Occupied(String),
}

/// Check whether `path` is the root of a git repository (regular or bare)
///
/// Unlike discovery, this does not search parent directories.
pub fn is_git_repository(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_dir() && Repository::open(path).is_ok()
}

/// Classify the current state of a clone destination
pub fn inspect_destination(path: impl AsRef<Path>) -> Result<Destination> {
    let path = path.as_ref();

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Destination::Missing),
        Err(e) => return Err(Error::Io(e)),
    };

    if !metadata.is_dir() {
        return Ok(Destination::Occupied(format!(
            "{} exists and is not a directory",
            path.display()
        )));
    }

    if is_git_repository(path) {
        return Ok(Destination::Repository);
    }

    if std::fs::read_dir(path)?.next().is_none() {
        return Ok(Destination::EmptyDir);
    }

    Ok(Destination::Occupied(format!(
        "{} exists and is not a git repository",
        path.display()
    )))
}

/// Name of the checked-out branch, if HEAD points at one
pub fn current_branch(path: impl AsRef<Path>) -> Result<Option<String>> {
    let repo = Repository::open(path.as_ref())
        .map_err(|e| Error::Git(format!("Failed to open {}: {}", path.as_ref().display(), e)))?;

    let head = match repo.head() {
        Ok(h) => h,
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
        Err(e) => return Err(Error::Git(format!("Failed to get HEAD: {}", e))),
    };

    if head.is_branch() {
        Ok(head.shorthand().map(|s| s.to_string()))
    } else {
        // Detached HEAD
        Ok(None)
    }
}
