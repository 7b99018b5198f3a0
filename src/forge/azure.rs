//! Azure DevOps URLs.
//!
//! Azure DevOps addresses files through query parameters on the repository
//! URL rather than path segments, and encodes the revision kind in the
//! version: `GB<branch>` for branches, `GC<commit>` for commits.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::provider::{ForgeProvider, ProviderSettings, RemoteLookup, UrlRequest, split_org_repo};
use super::segments::{WebRoot, push_segments};
use super::settings::{ProviderKind, ResolverConfig};
use super::types::{OrgRepoInfo, SelectionRange, UrlBundle};
use crate::local::HeadReference;

const WEB_HOSTNAME: &str = "dev.azure.com";
const SSH_HOSTNAME: &str = "ssh.dev.azure.com";
const DEFAULT_HOSTNAMES: &[&str] = &[WEB_HOSTNAME, SSH_HOSTNAME];

/// Path segment separating `<org>/<project>` from the repository in HTTPS
/// remotes and web URLs.
const GIT_MARKER: &str = "_git";

/// API version prefix leading SSH remote paths.
const SSH_VERSION_MARKER: &str = "v3";

/// Provider for Azure DevOps repositories.
#[derive(Debug)]
pub struct AzureDevOps {
    settings: ProviderSettings,
}

impl AzureDevOps {
    /// Creates the provider from explicit configuration.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: Arc<dyn RemoteLookup>) -> Self {
        Self {
            settings: ProviderSettings::new(
                ProviderKind::Azure,
                DEFAULT_HOSTNAMES,
                config,
                lookup,
            ),
        }
    }
}

fn version(head: &HeadReference) -> String {
    match head {
        HeadReference::Branch(name) => format!("GB{name}"),
        HeadReference::Sha(sha) => format!("GC{sha}"),
    }
}

fn append_lines(url: &mut Url, selection: &SelectionRange) {
    let mut query = url.query_pairs_mut();
    query
        .append_pair("line", &selection.start_line_number().to_string())
        .append_pair("lineEnd", &selection.end_line_number().to_string());
    if selection.has_columns() {
        query
            .append_pair(
                "lineStartColumn",
                &selection.start_column_number().to_string(),
            )
            .append_pair("lineEndColumn", &selection.end_column_number().to_string());
    }
}

#[async_trait]
impl ForgeProvider for AzureDevOps {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Accepts `v3/<org>/<project>/<repo>` (SSH) and
    /// `<org>/<project>/_git/<repo>` (HTTPS).
    fn org_repo(&self, segments: &[String]) -> Option<(String, String)> {
        let meaningful: Vec<String> = segments
            .iter()
            .enumerate()
            .filter(|(index, segment)| {
                let is_marker = segment.as_str() == GIT_MARKER;
                let is_ssh_version = *index == 0 && segment.as_str() == SSH_VERSION_MARKER;
                !(is_marker || is_ssh_version)
            })
            .map(|(_, segment)| segment.clone())
            .collect();
        split_org_repo(&meaningful)
    }

    fn web_hostname(&self, matched: &str) -> String {
        if matched == SSH_HOSTNAME {
            WEB_HOSTNAME.to_owned()
        } else {
            matched.to_owned()
        }
    }

    fn build_urls(&self, info: &OrgRepoInfo, request: &UrlRequest<'_>) -> Option<UrlBundle> {
        let root = WebRoot::new(&info.hostname)?;
        let repo_url = root.join([info.org.as_str(), GIT_MARKER, info.repo.as_str()]);
        let revision = version(request.head);

        let file_url = |view: Option<&str>, with_lines: bool| {
            request.relative_file_path.map(|path| {
                let mut url = repo_url.clone();
                url.query_pairs_mut()
                    .append_pair("path", &format!("/{path}"))
                    .append_pair("version", &revision);
                if let Some(selection) = request.selection.as_ref().filter(|_| with_lines) {
                    append_lines(&mut url, selection);
                }
                if let Some(action) = view {
                    url.query_pairs_mut().append_pair("_a", action);
                }
                url.to_string()
            })
        };

        let mut compare_url = repo_url.clone();
        push_segments(&mut compare_url, ["branches"]);
        compare_url
            .query_pairs_mut()
            .append_pair("targetVersion", &revision)
            .append_pair("_a", "commits");

        let mut pr_url = repo_url.clone();
        push_segments(&mut pr_url, ["pullrequestcreate"]);
        pr_url
            .query_pairs_mut()
            .append_pair("sourceRef", request.head.value());

        Some(UrlBundle {
            blob_url: file_url(None, true),
            blame_url: file_url(Some("annotate"), true),
            history_url: file_url(Some("history"), false),
            compare_url: Some(compare_url.to_string()),
            pr_url: Some(pr_url.to_string()),
            repo_url: Some(repo_url.to_string()),
        })
    }
}
