//! The capability every forge provider implements.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::remote::{ParsedRemote, parse_remote};
use super::settings::{ProviderKind, ResolverConfig};
use super::types::{OrgRepoInfo, SelectionRange, UrlBundle};
use crate::local::HeadReference;

/// Looks up the URL configured for a remote name.
///
/// Implemented over a repository's metadata directory by
/// [`GitMetadata`](crate::local::GitMetadata); providers only ever see this
/// seam, never the filesystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Returns the URL of `remote_name`, or `None` when it is not configured.
    async fn remote_url(&self, remote_name: &str) -> Option<String>;
}

/// Inputs for URL generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlRequest<'a> {
    /// Selected lines, or `None` to omit line anchors.
    pub selection: Option<SelectionRange>,
    /// Revision the URLs are anchored to.
    pub head: &'a HeadReference,
    /// File path relative to the repository root, `/`-separated, or `None`
    /// when only the repository is known.
    pub relative_file_path: Option<&'a str>,
}

/// Hostnames, remote name, and remote lookup a provider works with.
pub struct ProviderSettings {
    hostnames: Vec<String>,
    remote: String,
    lookup: Arc<dyn RemoteLookup>,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("hostnames", &self.hostnames)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}

impl ProviderSettings {
    /// Combines the provider's default hostnames with configured ones.
    ///
    /// Configured hostnames are added to the defaults and never replace
    /// them, so the public instance keeps matching.
    #[must_use]
    pub fn new(
        kind: ProviderKind,
        default_hostnames: &[&str],
        config: &ResolverConfig,
        lookup: Arc<dyn RemoteLookup>,
    ) -> Self {
        let mut hostnames: Vec<String> = Vec::new();
        let configured = config.provider(kind).hostnames;
        let candidates = default_hostnames
            .iter()
            .copied()
            .chain(configured.iter().map(String::as_str));

        for candidate in candidates {
            if let Some(hostname) = normalize_hostname(candidate) {
                if !hostnames.contains(&hostname) {
                    hostnames.push(hostname);
                }
            }
        }

        Self {
            hostnames,
            remote: config.remote_for(kind),
            lookup,
        }
    }

    /// Returns the hostnames this provider matches.
    #[must_use]
    pub fn hostnames(&self) -> &[String] {
        &self.hostnames
    }

    /// Returns the remote name this provider queries.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Returns the first hostname matching the remote's host.
    ///
    /// A hostname configured with a port matches only that port.
    fn match_host(&self, remote: &ParsedRemote) -> Option<&str> {
        let with_port = remote
            .port()
            .map(|port| format!("{}:{port}", remote.host()));

        self.hostnames
            .iter()
            .find(|hostname| {
                hostname.as_str() == remote.host() || with_port.as_deref() == Some(hostname.as_str())
            })
            .map(String::as_str)
    }
}

/// Strips a scheme and trailing slashes from a configured hostname.
///
/// `https://github.com/` and `github.com` both normalise to `github.com`.
#[must_use]
pub fn normalize_hostname(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let hostname = without_scheme.trim_end_matches('/').to_ascii_lowercase();

    (!hostname.is_empty()).then_some(hostname)
}

/// Splits path segments into organisation (every segment but the last) and
/// repository (the last segment).
pub(crate) fn split_org_repo(segments: &[String]) -> Option<(String, String)> {
    let (repo, org) = segments.split_last()?;
    if org.is_empty() || repo.is_empty() {
        return None;
    }
    Some((org.join("/"), repo.clone()))
}

/// A forge that can recognise its remotes and build browse URLs.
///
/// Implementors supply their identity, settings, and URL grammar; matching a
/// remote and the overall `get_urls` flow are shared.
#[async_trait]
pub trait ForgeProvider: Send + Sync {
    /// Identifies the forge.
    fn kind(&self) -> ProviderKind;

    /// Returns the provider's hostnames and remote lookup.
    fn settings(&self) -> &ProviderSettings;

    /// Extracts `(org, repo)` from a matched remote's path segments.
    fn org_repo(&self, segments: &[String]) -> Option<(String, String)> {
        split_org_repo(segments)
    }

    /// Maps the matched hostname to the host serving the web UI.
    fn web_hostname(&self, matched: &str) -> String {
        matched.to_owned()
    }

    /// Builds the URL set for an already matched repository.
    fn build_urls(&self, info: &OrgRepoInfo, request: &UrlRequest<'_>) -> Option<UrlBundle>;

    /// Looks up the configured remote and matches it against this forge.
    ///
    /// Returns `None` when the remote is missing, unparseable, hosted
    /// elsewhere, or lacks an organisation and repository.
    async fn find_org_info(&self) -> Option<OrgRepoInfo> {
        let settings = self.settings();
        let Some(url) = settings.lookup.remote_url(settings.remote()).await else {
            tracing::trace!(provider = %self.kind(), remote = settings.remote(), "remote not configured");
            return None;
        };

        let parsed = parse_remote(&url)?;
        let matched = settings.match_host(&parsed)?;
        let (org, repo) = self.org_repo(parsed.segments())?;

        Some(OrgRepoInfo {
            org,
            repo,
            hostname: self.web_hostname(matched),
        })
    }

    /// Generates every URL this forge supports for `request`.
    ///
    /// Returns `None` when the repository's remote does not belong to this
    /// forge.
    async fn get_urls(&self, request: &UrlRequest<'_>) -> Option<UrlBundle> {
        let info = self.find_org_info().await?;
        tracing::debug!(provider = %self.kind(), org = %info.org, repo = %info.repo, "provider matched remote");
        self.build_urls(&info, request)
    }
}
