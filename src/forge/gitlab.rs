//! GitLab URLs.
//!
//! GitLab mirrors GitHub's path layout but anchors line ranges as
//! `#L18-25` and opens merge requests through a query parameter.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ForgeProvider, ProviderSettings, RemoteLookup, UrlRequest};
use super::segments::WebRoot;
use super::settings::{ProviderKind, ResolverConfig};
use super::types::{OrgRepoInfo, SelectionRange, UrlBundle};

const DEFAULT_HOSTNAMES: &[&str] = &["gitlab.com"];

/// Provider for GitLab-hosted repositories.
#[derive(Debug)]
pub struct Gitlab {
    settings: ProviderSettings,
}

impl Gitlab {
    /// Creates the provider from explicit configuration.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: Arc<dyn RemoteLookup>) -> Self {
        Self {
            settings: ProviderSettings::new(
                ProviderKind::Gitlab,
                DEFAULT_HOSTNAMES,
                config,
                lookup,
            ),
        }
    }
}

fn line_fragment(selection: &SelectionRange) -> String {
    format!(
        "L{}-{}",
        selection.start_line_number(),
        selection.end_line_number()
    )
}

#[async_trait]
impl ForgeProvider for Gitlab {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gitlab
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn build_urls(&self, info: &OrgRepoInfo, request: &UrlRequest<'_>) -> Option<UrlBundle> {
        let root = WebRoot::new(&info.hostname)?;
        let org = info.org.as_str();
        let repo = info.repo.as_str();
        let head = request.head.value();
        let fragment = request.selection.as_ref().map(line_fragment);

        let file_url = |mode: &str, with_lines: bool| {
            request.relative_file_path.map(|path| {
                let mut url = root.join([org, repo, mode, head, path]);
                if with_lines {
                    url.set_fragment(fragment.as_deref());
                }
                url.to_string()
            })
        };

        let mut pr_url = root.join([org, repo, "merge_requests", "new"]);
        pr_url
            .query_pairs_mut()
            .append_pair("merge_request[source_branch]", head);

        Some(UrlBundle {
            blob_url: file_url("blob", true),
            blame_url: file_url("blame", true),
            history_url: file_url("commits", false),
            compare_url: Some(root.join([org, repo, "compare", head]).to_string()),
            pr_url: Some(pr_url.to_string()),
            repo_url: Some(root.join([org, repo]).to_string()),
        })
    }
}
