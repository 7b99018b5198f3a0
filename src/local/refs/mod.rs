//! HEAD and branch resolution from loose and packed refs.

use std::path::Path;

use super::error::{LocalGitError, read_optional};
use super::types::{CommitSha, HeadState};

const HEADS_PREFIX: &str = "refs/heads/";

/// Resolves a short branch name to the commit it points at.
///
/// A loose ref at `<metadata_dir>/refs/heads/<branch>` takes precedence over
/// an entry in `<metadata_dir>/packed-refs`. Packed entries match only on the
/// exact `refs/heads/<branch>` path; tags and remote-tracking refs sharing the
/// short name are ignored.
///
/// # Errors
///
/// Returns [`LocalGitError::Io`] when a ref file exists but cannot be read.
pub async fn resolve_branch_sha(
    metadata_dir: &Path,
    branch: &str,
) -> Result<Option<CommitSha>, LocalGitError> {
    let ref_name = format!("{HEADS_PREFIX}{}", branch.trim());

    let loose_path = metadata_dir.join(&ref_name);
    if let Some(contents) = read_optional(&loose_path).await? {
        let sha = contents.trim();
        if !sha.is_empty() {
            return Ok(Some(CommitSha::new(sha)));
        }
    }

    let packed_path = metadata_dir.join("packed-refs");
    let Some(packed) = read_optional(&packed_path).await? else {
        return Ok(None);
    };

    Ok(find_packed_ref(&packed, &ref_name))
}

/// Scans `packed-refs` contents for an exact ref path.
fn find_packed_ref(packed: &str, ref_name: &str) -> Option<CommitSha> {
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .find_map(|line| {
            let (sha, path) = line.split_once(' ')?;
            (!sha.is_empty() && path.trim() == ref_name).then(|| CommitSha::new(sha))
        })
}

/// Reads HEAD and resolves it to a commit.
///
/// A detached HEAD holds a commit id directly and is returned without
/// further lookups. An attached HEAD (`ref: refs/heads/<name>`) is resolved
/// through [`resolve_branch_sha`]; when the branch has no commit the whole
/// read yields `None`, since the repository is then in a state no URL can be
/// anchored to (for example a fresh repository before its first commit).
///
/// # Errors
///
/// Returns [`LocalGitError::Io`] when HEAD or a ref file exists but cannot be
/// read.
pub async fn read_head(metadata_dir: &Path) -> Result<Option<HeadState>, LocalGitError> {
    let head_path = metadata_dir.join("HEAD");
    let Some(contents) = read_optional(&head_path).await? else {
        return Ok(None);
    };

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let Some((_, raw_target)) = trimmed.split_once(' ') else {
        return Ok(Some(HeadState {
            sha: CommitSha::new(trimmed),
            branch: None,
        }));
    };

    let target = raw_target.trim();
    let branch = target.strip_prefix(HEADS_PREFIX).unwrap_or(target);

    match resolve_branch_sha(metadata_dir, branch).await? {
        Some(sha) => Ok(Some(HeadState {
            sha,
            branch: Some(branch.to_owned()),
        })),
        None => {
            tracing::warn!(branch, "HEAD names a branch with no commit");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests;
