//! Error types for reading local Git metadata.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors that may occur while reading a repository's metadata directory.
///
/// A missing file is never an error here: readers report absence as `None`
/// because a workspace may legitimately lack a repository, a commit, or the
/// remote being asked for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalGitError {
    /// A metadata file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path of the file or directory that failed.
        path: String,
        /// Error detail from the operating system.
        message: String,
    },
}

impl LocalGitError {
    pub(crate) fn io(path: &Path, error: &io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

/// Returns true for I/O errors that mean "nothing is there".
///
/// `NotADirectory` shows up when a path component is a regular file, which
/// happens when the locator is started from a file path. `IsADirectory`
/// shows up when a loose ref name is only a prefix of deeper refs, as
/// `refs/heads/dev` is when only `dev/login` exists.
pub(crate) fn is_absent(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory
    )
}

/// Reads a UTF-8 file, mapping absence to `Ok(None)`.
pub(crate) async fn read_optional(path: &Path) -> Result<Option<String>, LocalGitError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if is_absent(&error) => Ok(None),
        Err(error) => Err(LocalGitError::io(path, &error)),
    }
}
