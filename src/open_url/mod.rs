//! Maps forge blob URLs back to local files.
//!
//! Only the `/<org>/<repo>/blob/<revision>/<path...>` shape is understood.
//! The revision is assumed to be a single segment, so a branch name
//! containing `/` shifts part of it into the returned path.

mod error;
mod fragment;

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::Url;

pub use error::OpenUrlError;
use fragment::parse_fragment;

use crate::forge::SelectionRange;

/// Segments before the file path: org, repo, mode, revision.
const LEADING_SEGMENTS: usize = 4;

/// A repository-relative location extracted from a forge URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlLocation {
    /// `/`-separated path relative to the repository root.
    pub relative_path: String,
    /// Selection from the URL fragment, when one could be read.
    pub selection: Option<SelectionRange>,
}

/// A local file to open, with the selection to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOpenRequest {
    /// Absolute path of the file under a workspace root.
    pub path: PathBuf,
    /// Selection to apply after opening.
    pub selection: Option<SelectionRange>,
}

/// Parses a forge blob URL into a relative path and selection.
///
/// # Errors
///
/// Returns [`OpenUrlError::InvalidUrl`] when the input is not an absolute URL
/// or a decoded path segment is not valid UTF-8 or is not a single path
/// component, and
/// [`OpenUrlError::MissingPath`] when nothing follows the revision segment.
pub fn parse_forge_url(input: &str) -> Result<UrlLocation, OpenUrlError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|error| OpenUrlError::InvalidUrl {
        url: trimmed.to_owned(),
        message: error.to_string(),
    })?;

    let Some(segments) = url.path_segments() else {
        return Err(OpenUrlError::MissingPath {
            url: trimmed.to_owned(),
        });
    };

    let mut parts = Vec::new();
    for segment in segments.skip(LEADING_SEGMENTS).filter(|part| !part.is_empty()) {
        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|error| OpenUrlError::InvalidUrl {
                url: trimmed.to_owned(),
                message: error.to_string(),
            })?;
        if !is_plain_component(&decoded) {
            return Err(OpenUrlError::InvalidUrl {
                url: trimmed.to_owned(),
                message: format!("path segment {decoded:?} leaves the repository"),
            });
        }
        parts.push(decoded.into_owned());
    }

    if parts.is_empty() {
        return Err(OpenUrlError::MissingPath {
            url: trimmed.to_owned(),
        });
    }

    let selection = url.fragment().and_then(parse_fragment);
    if selection.is_none() && url.fragment().is_some_and(|fragment| !fragment.is_empty()) {
        tracing::debug!(url = trimmed, "ignoring unreadable selection fragment");
    }

    Ok(UrlLocation {
        relative_path: parts.join("/"),
        selection,
    })
}

/// Finds the file a forge URL points at under the first matching workspace
/// root.
///
/// # Errors
///
/// Returns the parse errors of [`parse_forge_url`], or
/// [`OpenUrlError::FileNotFound`] when no root contains the file.
pub async fn open_from_url(
    input: &str,
    workspace_roots: &[PathBuf],
) -> Result<FileOpenRequest, OpenUrlError> {
    let location = parse_forge_url(input)?;

    for root in workspace_roots {
        let candidate = join_relative(root, &location.relative_path);
        match tokio::fs::metadata(&candidate).await {
            Ok(metadata) if metadata.is_file() => {
                tracing::debug!(path = %candidate.display(), "found file for URL");
                return Ok(FileOpenRequest {
                    path: candidate,
                    selection: location.selection,
                });
            }
            Ok(_) => {}
            Err(error) => {
                tracing::trace!(path = %candidate.display(), %error, "file not in workspace");
            }
        }
    }

    Err(OpenUrlError::FileNotFound {
        path: location.relative_path,
    })
}

/// A decoded segment must name exactly one path component below its parent.
fn is_plain_component(segment: &str) -> bool {
    segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}

fn join_relative(root: &Path, relative_path: &str) -> PathBuf {
    relative_path
        .split('/')
        .fold(root.to_path_buf(), |path, component| path.join(component))
}
