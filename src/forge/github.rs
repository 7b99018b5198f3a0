//! GitHub and GitHub Enterprise URLs.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ForgeProvider, ProviderSettings, RemoteLookup, UrlRequest};
use super::segments::WebRoot;
use super::settings::{ProviderKind, ResolverConfig};
use super::types::{OrgRepoInfo, SelectionRange, UrlBundle};

const DEFAULT_HOSTNAMES: &[&str] = &["github.com"];

/// Provider for GitHub-hosted repositories.
#[derive(Debug)]
pub struct Github {
    settings: ProviderSettings,
}

impl Github {
    /// Creates the provider from explicit configuration.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: Arc<dyn RemoteLookup>) -> Self {
        Self {
            settings: ProviderSettings::new(
                ProviderKind::Github,
                DEFAULT_HOSTNAMES,
                config,
                lookup,
            ),
        }
    }
}

/// Renders `L18-L25`, or `L18C5-L25C6` when columns are meaningful.
pub(crate) fn line_fragment(selection: &SelectionRange) -> String {
    if selection.has_columns() {
        format!(
            "L{}C{}-L{}C{}",
            selection.start_line_number(),
            selection.start_column_number(),
            selection.end_line_number(),
            selection.end_column_number()
        )
    } else {
        format!(
            "L{}-L{}",
            selection.start_line_number(),
            selection.end_line_number()
        )
    }
}

#[async_trait]
impl ForgeProvider for Github {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Github
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

        Some(UrlBundle {
            blob_url: file_url("blob", true),
            blame_url: file_url("blame", true),
            history_url: file_url("commits", false),
            compare_url: Some(root.join([org, repo, "compare", head]).to_string()),
            pr_url: Some(root.join([org, repo, "pull", "new", head]).to_string()),
            repo_url: Some(root.join([org, repo]).to_string()),
        })
    }
}
