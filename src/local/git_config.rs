//! Remote URL lookup in a repository's `config` file.
//!
//! Only the subset of the Git config grammar needed to find
//! `[remote "<name>"] url = ...` is understood: section headers, `key = value`
//! pairs, and `#`/`;` comment lines.

use std::path::Path;

use super::error::{LocalGitError, read_optional};

const REMOTE_SECTION_PREFIX: &str = "remote \"";

/// Reads the URL configured for `remote_name`.
///
/// Returns `Ok(None)` when the config file, the `[remote "<name>"]` section,
/// or its `url` key is missing. The remote name must match exactly.
///
/// # Errors
///
/// Returns [`LocalGitError::Io`] when the config file exists but cannot be
/// read.
pub async fn read_remote_url(
    metadata_dir: &Path,
    remote_name: &str,
) -> Result<Option<String>, LocalGitError> {
    let config_path = metadata_dir.join("config");
    let Some(contents) = read_optional(&config_path).await? else {
        return Ok(None);
    };

    Ok(find_remote_url(&contents, remote_name))
}

/// Finds the first `url` in the section for `remote_name`.
fn find_remote_url(contents: &str, remote_name: &str) -> Option<String> {
    let mut in_remote = false;

    for raw_line in contents.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(open) = line.strip_prefix('[') {
            let header = open.strip_suffix(']').unwrap_or(open).trim();
            in_remote = section_remote_name(header) == Some(remote_name);
            continue;
        }

        if !in_remote {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("url") {
            let url = unquote(value.trim());
            return (!url.is_empty()).then(|| url.to_owned());
        }
    }

    None
}

/// Returns the remote name from a `remote "<name>"` header.
fn section_remote_name(header: &str) -> Option<&str> {
    let rest = header.strip_prefix(REMOTE_SECTION_PREFIX)?;
    Some(rest.strip_suffix('"').unwrap_or(rest))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
