//! A handle on one repository's metadata directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::LocalGitError;
use super::git_config::read_remote_url;
use super::refs::{read_head, resolve_branch_sha};
use super::types::{CommitSha, HeadState};
use crate::forge::RemoteLookup;

/// Read-only access to the metadata of a located repository.
///
/// Every call re-reads the underlying files; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitMetadata {
    metadata_dir: PathBuf,
}

impl GitMetadata {
    /// Wraps a metadata directory, usually from
    /// [`RepositoryLocation::metadata_dir`](super::RepositoryLocation::metadata_dir).
    #[must_use]
    pub fn new(metadata_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata_dir: metadata_dir.into(),
        }
    }

    /// Returns the wrapped directory.
    #[must_use]
    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    /// See [`read_head`].
    ///
    /// # Errors
    ///
    /// Returns [`LocalGitError::Io`] when a metadata file cannot be read.
    pub async fn head(&self) -> Result<Option<HeadState>, LocalGitError> {
        read_head(&self.metadata_dir).await
    }

    /// See [`resolve_branch_sha`].
    ///
    /// # Errors
    ///
    /// Returns [`LocalGitError::Io`] when a ref file cannot be read.
    pub async fn branch_sha(&self, branch: &str) -> Result<Option<CommitSha>, LocalGitError> {
        resolve_branch_sha(&self.metadata_dir, branch).await
    }
}

#[async_trait]
impl RemoteLookup for GitMetadata {
    async fn remote_url(&self, remote_name: &str) -> Option<String> {
        match read_remote_url(&self.metadata_dir, remote_name).await {
            Ok(url) => url,
            Err(error) => {
                tracing::warn!(remote = remote_name, %error, "could not read remote URL");
                None
            }
        }
    }
}
