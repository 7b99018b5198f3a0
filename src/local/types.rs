//! Domain-specific types for Git metadata.
//!
//! This module provides newtype wrappers and value objects for the data read
//! out of a repository's metadata directory, improving type safety and making
//! APIs more self-documenting.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A Git commit SHA identifier.
///
/// The wrapped value is always trimmed of surrounding whitespace, so a SHA
/// read from a ref file with a trailing newline compares equal to the same
/// SHA read from `packed-refs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a new `CommitSha`, trimming surrounding whitespace.
    #[must_use]
    pub fn new(sha: &str) -> Self {
        Self(sha.trim().to_owned())
    }

    /// Returns the SHA as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommitSha {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for CommitSha {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The revision a generated URL is anchored to.
///
/// Forges mostly treat the two kinds identically, but Azure DevOps encodes
/// them with different version prefixes, so the kind is carried explicitly
/// instead of being guessed from the string's shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HeadReference {
    /// A short branch name with the `refs/heads/` prefix stripped.
    Branch(String),
    /// A full commit identifier.
    Sha(CommitSha),
}

impl HeadReference {
    /// Creates a branch reference, stripping a leading `refs/heads/`.
    #[must_use]
    pub fn branch(name: &str) -> Self {
        let trimmed = name.trim();
        Self::Branch(
            trimmed
                .strip_prefix("refs/heads/")
                .unwrap_or(trimmed)
                .to_owned(),
        )
    }

    /// Creates a commit reference.
    #[must_use]
    pub fn sha(sha: &str) -> Self {
        Self::Sha(CommitSha::new(sha))
    }

    /// Returns the branch name or commit identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Branch(name) => name,
            Self::Sha(sha) => sha.as_str(),
        }
    }

    /// Returns true when this reference names a branch.
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }
}

impl fmt::Display for HeadReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// The commit HEAD points at, plus the checked-out branch when attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadState {
    /// Commit HEAD resolves to.
    pub sha: CommitSha,
    /// Short branch name, or `None` for a detached HEAD.
    pub branch: Option<String>,
}

/// Where a repository's metadata lives and which directory it describes.
///
/// For an ordinary checkout `metadata_dir` is `<root>/.git`. For a submodule
/// the `.git` entry is a gitlink file, so `metadata_dir` points elsewhere
/// (typically into the superproject's `.git/modules`) while
/// `repository_root` stays the submodule's working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    metadata_dir: PathBuf,
    repository_root: PathBuf,
}

impl RepositoryLocation {
    /// Creates a location from its two paths.
    #[must_use]
    pub const fn new(metadata_dir: PathBuf, repository_root: PathBuf) -> Self {
        Self {
            metadata_dir,
            repository_root,
        }
    }

    /// Returns the Git metadata directory.
    #[must_use]
    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    /// Returns the working-tree root the metadata belongs to.
    #[must_use]
    pub fn repository_root(&self) -> &Path {
        &self.repository_root
    }

    /// Returns `path` relative to the repository root using `/` separators.
    ///
    /// Returns `None` when `path` lies outside the root or is the root
    /// itself.
    #[must_use]
    pub fn relative_file_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.repository_root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();

        if segments.is_empty() {
            return None;
        }
        Some(segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rstest::rstest;

    use super::{CommitSha, HeadReference, RepositoryLocation};

    #[test]
    fn commit_sha_is_trimmed() {
        let sha = CommitSha::new("  db99a912f5c4bffe11d91e163cd78ed96589611b\n");
        assert_eq!(sha.as_str(), "db99a912f5c4bffe11d91e163cd78ed96589611b");
    }

    #[rstest]
    #[case::short("main", "main")]
    #[case::qualified("refs/heads/feature/x", "feature/x")]
    #[case::padded(" main\n", "main")]
    fn branch_reference_strips_prefix(#[case] input: &str, #[case] expected: &str) {
        let head = HeadReference::branch(input);
        assert!(head.is_branch());
        assert_eq!(head.value(), expected);
    }

    #[test]
    fn sha_reference_is_not_a_branch() {
        let head = HeadReference::sha("abc123");
        assert!(!head.is_branch());
        assert_eq!(head.to_string(), "abc123");
    }

    #[test]
    fn relative_file_path_uses_forward_slashes() {
        let location = RepositoryLocation::new(
            PathBuf::from("/work/repo/.git"),
            PathBuf::from("/work/repo"),
        );

        assert_eq!(
            location.relative_file_path(Path::new("/work/repo/src/app.ts")),
            Some("src/app.ts".to_owned())
        );
        assert_eq!(location.relative_file_path(Path::new("/work/repo")), None);
        assert_eq!(location.relative_file_path(Path::new("/elsewhere/a.rs")), None);
    }
}
