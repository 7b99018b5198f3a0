//! Upward search for a repository's metadata directory.
//!
//! The search re-walks the filesystem on every call: the working directory or
//! the repository itself may have changed since the previous request.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::error::{LocalGitError, is_absent};
use super::types::RepositoryLocation;

/// Name of the metadata entry looked for in each directory.
const GIT_ENTRY: &str = ".git";

/// Prefix of the single meaningful line in a gitlink file.
const GITDIR_PREFIX: &str = "gitdir:";

/// Finds the repository containing `start_path`.
///
/// Starting at `start_path`, checks whether `<dir>/.git` exists as a
/// directory or a regular file, moving to the parent directory until the
/// filesystem root is reached. A `.git` file is treated as a submodule
/// gitlink and its `gitdir:` target is resolved relative to the directory
/// holding it.
///
/// Returns `Ok(None)` when no repository is found or when a gitlink file does
/// not contain a `gitdir:` line.
///
/// # Errors
///
/// Returns [`LocalGitError::Io`] when an existing `.git` entry cannot be
/// inspected or read.
pub async fn locate(start_path: &Path) -> Result<Option<RepositoryLocation>, LocalGitError> {
    let mut directory = start_path.to_path_buf().clean();

    loop {
        if let Some(location) = probe(&directory).await? {
            tracing::debug!(
                metadata_dir = %location.metadata_dir().display(),
                repository_root = %location.repository_root().display(),
                "located repository"
            );
            return Ok(Some(location));
        }

        match directory.parent() {
            Some(parent) if parent != directory => directory = parent.to_path_buf(),
            _ => {
                tracing::debug!(start = %start_path.display(), "no repository found");
                return Ok(None);
            }
        }
    }
}

/// Inspects `<directory>/.git` without a separate existence check.
async fn probe(directory: &Path) -> Result<Option<RepositoryLocation>, LocalGitError> {
    let candidate = directory.join(GIT_ENTRY);
    let metadata = match tokio::fs::metadata(&candidate).await {
        Ok(metadata) => metadata,
        Err(error) if is_absent(&error) => return Ok(None),
        Err(error) => return Err(LocalGitError::io(&candidate, &error)),
    };

    if metadata.is_dir() {
        return Ok(Some(RepositoryLocation::new(
            candidate,
            directory.to_path_buf(),
        )));
    }

    if !metadata.is_file() {
        return Ok(None);
    }

    let contents = match tokio::fs::read_to_string(&candidate).await {
        Ok(contents) => contents,
        Err(error) if is_absent(&error) => return Ok(None),
        Err(error) => return Err(LocalGitError::io(&candidate, &error)),
    };

    let Some(target) = parse_gitlink(&contents) else {
        tracing::warn!(path = %candidate.display(), "gitlink file has no gitdir line");
        return Ok(None);
    };

    Ok(Some(RepositoryLocation::new(
        directory.join(target).clean(),
        directory.to_path_buf(),
    )))
}

/// Extracts the target of a `gitdir: <path>` line.
fn parse_gitlink(contents: &str) -> Option<PathBuf> {
    contents.lines().find_map(|line| {
        let target = line.trim().strip_prefix(GITDIR_PREFIX)?.trim();
        (!target.is_empty()).then(|| PathBuf::from(target))
    })
}
