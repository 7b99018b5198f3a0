//! Git remote URL parsing.
//!
//! This module splits the remote URL formats Git accepts into a host,
//! optional port, and path segments. Matching against forge hostnames and
//! extracting organisation and repository happen in the providers.

use percent_encoding::percent_decode_str;

const GIT_SUFFIX: &str = ".git";

/// A remote URL broken into the parts providers match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRemote {
    host: String,
    port: Option<u16>,
    segments: Vec<String>,
}

impl ParsedRemote {
    /// Returns the host, lower-cased.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port, if any.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the non-empty path segments, with any `.git` suffix removed
    /// from the last one.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Parses a Git remote URL.
///
/// Supports the following URL formats:
/// - SSH: `git@github.com:owner/repo.git`
/// - SSH with an alias user: `org-123@github.com:owner/repo`
/// - SSH with protocol: `ssh://git@github.com/owner/repo.git`
/// - SSH with port: `ssh://git@github.com:22/owner/repo.git`
/// - HTTPS, optionally with a user: `https://user@host/owner/repo.git`
/// - Git protocol: `git://host/owner/repo.git`
///
/// The `.git` suffix is optional and stripped if present.
///
/// Returns `None` if the URL cannot be parsed or has no path.
#[must_use]
pub fn parse_remote(url: &str) -> Option<ParsedRemote> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Try SSH SCP-style format first: git@host:owner/repo.git
    try_parse_scp_style(trimmed).or_else(|| try_parse_url_style(trimmed))
}

/// Attempts to parse SCP-style SSH URL: `[user@]host:path`
///
/// SCP-style URLs do not support port numbers, so port is always `None`.
fn try_parse_scp_style(url: &str) -> Option<ParsedRemote> {
    // If there's a :// this is URL-style, not SCP-style
    if url.contains("://") {
        return None;
    }

    let (authority, path) = url.split_once(':')?;
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    // Reject things like `C:\repo` or `/path:with/colon`
    if host.len() < 2 || host.contains('/') || host.contains('\\') {
        return None;
    }

    build(host, None, path)
}

/// Attempts to parse URL-style remote: `https://host/owner/repo.git`
fn try_parse_url_style(url: &str) -> Option<ParsedRemote> {
    let parsed = url::Url::parse(url).ok()?;

    let host = parsed.host_str()?;
    let port = parsed.port();
    let path = percent_decode_str(parsed.path()).decode_utf8_lossy();

    build(host, port, &path)
}

fn build(host: &str, port: Option<u16>, raw_path: &str) -> Option<ParsedRemote> {
    if host.is_empty() {
        return None;
    }

    let mut segments: Vec<String> = raw_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect();

    // Strip .git suffix if present
    if let Some(last) = segments.last_mut() {
        if last.ends_with(GIT_SUFFIX) {
            let stem_len = last.len().saturating_sub(GIT_SUFFIX.len());
            last.truncate(stem_len);
        }
    }
    segments.retain(|segment| !segment.is_empty());

    if segments.is_empty() {
        return None;
    }

    Some(ParsedRemote {
        host: host.to_ascii_lowercase(),
        port,
        segments,
    })
}
