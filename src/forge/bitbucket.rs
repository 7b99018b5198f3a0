//! Bitbucket URLs.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ForgeProvider, ProviderSettings, RemoteLookup, UrlRequest};
use super::segments::WebRoot;
use super::settings::{ProviderKind, ResolverConfig};
use super::types::{OrgRepoInfo, SelectionRange, UrlBundle};

const DEFAULT_HOSTNAMES: &[&str] = &["bitbucket.org"];

/// Provider for Bitbucket-hosted repositories.
#[derive(Debug)]
pub struct Bitbucket {
    settings: ProviderSettings,
}

impl Bitbucket {
    /// Creates the provider from explicit configuration.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: Arc<dyn RemoteLookup>) -> Self {
        Self {
            settings: ProviderSettings::new(
                ProviderKind::Bitbucket,
                DEFAULT_HOSTNAMES,
                config,
                lookup,
            ),
        }
    }
}

fn line_fragment(selection: &SelectionRange) -> String {
    format!(
        "lines-{}:{}",
        selection.start_line_number(),
        selection.end_line_number()
    )
}

#[async_trait]
impl ForgeProvider for Bitbucket {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bitbucket
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

        // The open-ended `<head>..` compares against the repository's
        // main branch.
        let compare_target = format!("{head}..");

        let mut pr_url = root.join([org, repo, "pull-requests", "new"]);
        pr_url.query_pairs_mut().append_pair("source", head);

        Some(UrlBundle {
            blob_url: file_url("blob", true),
            blame_url: file_url("annotate", true),
            history_url: file_url("history-node", false),
            compare_url: Some(
                root.join([org, repo, "branches", "compare", compare_target.as_str()])
                    .to_string(),
            ),
            pr_url: Some(pr_url.to_string()),
            repo_url: Some(root.join([org, repo]).to_string()),
        })
    }
}
