//! Local Git repository discovery and metadata reading.
//!
//! This module finds the repository containing a path and reads the current
//! commit, branch, and remote URLs straight from the metadata directory. No
//! Git executable or library is involved; only `HEAD`, `config`,
//! `refs/heads/*`, `packed-refs`, and submodule gitlink files are read.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use forgelink::local::{GitMetadata, locate};
//!
//! # async fn run() -> Result<(), forgelink::local::LocalGitError> {
//! if let Some(location) = locate(Path::new("src/main.rs")).await? {
//!     let metadata = GitMetadata::new(location.metadata_dir());
//!     if let Some(head) = metadata.head().await? {
//!         println!("{} on {:?}", head.sha, head.branch);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod git_config;
mod locator;
mod metadata;
mod refs;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::LocalGitError;
pub use git_config::read_remote_url;
pub use locator::locate;
pub use metadata::GitMetadata;
pub use refs::{read_head, resolve_branch_sha};
pub use types::{CommitSha, HeadReference, HeadState, RepositoryLocation};
