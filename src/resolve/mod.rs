//! Turns an open document and selection into one forge URL.
//!
//! Resolution runs three stages in order, each consuming the previous
//! stage's output: locate the repository, read its HEAD (or a main branch),
//! then ask the provider registry for URLs. Nothing is cached between
//! requests.

mod document;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use serde::Serialize;

pub use document::Document;
pub use error::ResolveError;

use crate::forge::{
    ProviderKind, ProviderRegistry, RemoteLookup, ResolverConfig, SelectionRange, UrlBundle,
    UrlRequest, UrlVariant,
};
use crate::local::{GitMetadata, HeadReference, LocalGitError, RepositoryLocation, locate};

/// Which URL to produce and which revision to anchor it to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent user toggle"
)]
pub struct UrlFlags {
    /// Blame view instead of the file view.
    pub blame: bool,
    /// Anchor to a commit rather than a branch.
    pub permalink: bool,
    /// Anchor to the first configured main branch that exists.
    pub main_branch: bool,
    /// Repository home page.
    pub open_repo: bool,
    /// File history view.
    pub history: bool,
    /// New pull or merge request page.
    pub open_pr: bool,
    /// Compare view.
    pub compare: bool,
}

impl UrlFlags {
    /// Returns the URL kind these flags ask for.
    ///
    /// When several are set, repository wins over pull request, then
    /// compare, then history, then blame; the file view is the default.
    #[must_use]
    pub const fn variant(&self) -> UrlVariant {
        if self.open_repo {
            UrlVariant::Repository
        } else if self.open_pr {
            UrlVariant::PullRequest
        } else if self.compare {
            UrlVariant::Compare
        } else if self.history {
            UrlVariant::History
        } else if self.blame {
            UrlVariant::Blame
        } else {
            UrlVariant::Blob
        }
    }
}

/// One link request from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// The document the link is for.
    pub document: Document,
    /// Selected lines, zero-based.
    pub selection: Option<SelectionRange>,
    /// Which URL to produce.
    pub flags: UrlFlags,
}

/// A resolved link plus everything generated alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUrl {
    /// The selected URL.
    pub url: String,
    /// The kind of `url`; differs from the requested kind after a fallback.
    pub variant: UrlVariant,
    /// The forge that matched.
    pub provider: ProviderKind,
    /// Revision the URLs are anchored to.
    pub head: HeadReference,
    /// Every URL the forge generated.
    pub urls: UrlBundle,
}

/// Resolves a document to a forge URL.
///
/// # Errors
///
/// Returns a [`ResolveError`] naming the stage that failed: a virtual
/// document, no repository, an unreadable HEAD, no main branch, no matching
/// forge, or no URL of the requested kind or its fallbacks.
pub async fn resolve_url(
    request: &ResolveRequest,
    config: &ResolverConfig,
) -> Result<ResolvedUrl, ResolveError> {
    let (start_path, file_path) = match &request.document {
        Document::Virtual(uri) => return Err(ResolveError::NotAFile { uri: uri.clone() }),
        Document::File(path) => {
            let absolute = absolute_path(path)?;
            (absolute.clone(), Some(absolute))
        }
        Document::Workspace(root) => (absolute_path(root)?, None),
    };

    let location = locate(&start_path)
        .await?
        .ok_or_else(|| ResolveError::NoRepository {
            path: start_path.display().to_string(),
        })?;
    let metadata = GitMetadata::new(location.metadata_dir());
    let head = select_head(&metadata, request.flags, config).await?;
    tracing::debug!(head = %head, "anchoring URLs");

    let relative_file_path = file_path
        .as_deref()
        .and_then(|path| relative_to_root(&location, path));
    let selection = relative_file_path.as_ref().and(request.selection);

    let lookup: Arc<dyn RemoteLookup> = Arc::new(metadata);
    let registry = ProviderRegistry::new(config, &lookup);
    let found = registry
        .resolve(&UrlRequest {
            selection,
            head: &head,
            relative_file_path: relative_file_path.as_deref(),
        })
        .await
        .ok_or_else(|| ResolveError::NoProviderMatch {
            remote: config.global_remote(),
        })?;

    let requested = request.flags.variant();
    let (variant, url) = found
        .urls
        .select(requested)
        .map(|(chosen, chosen_url)| (chosen, chosen_url.to_owned()))
        .ok_or(ResolveError::NoUrl { variant: requested })?;
    if variant != requested {
        tracing::debug!(%requested, chosen = %variant, "requested URL unavailable, using fallback");
    }

    Ok(ResolvedUrl {
        url,
        variant,
        provider: found.provider,
        head,
        urls: found.urls,
    })
}

/// Picks the revision to anchor to.
///
/// A main branch wins when requested; otherwise a permalink uses HEAD's
/// commit and a plain request uses HEAD's branch, falling back to the commit
/// when HEAD is detached.
async fn select_head(
    metadata: &GitMetadata,
    flags: UrlFlags,
    config: &ResolverConfig,
) -> Result<HeadReference, ResolveError> {
    if flags.main_branch {
        return main_branch_head(metadata, flags.permalink, &config.main_branches).await;
    }

    let state = metadata.head().await?.ok_or(ResolveError::NoHead)?;
    let head = match state.branch {
        Some(branch) if !flags.permalink => HeadReference::Branch(branch),
        _ => HeadReference::Sha(state.sha),
    };
    Ok(head)
}

async fn main_branch_head(
    metadata: &GitMetadata,
    permalink: bool,
    candidates: &[String],
) -> Result<HeadReference, ResolveError> {
    for name in candidates {
        let candidate = name.trim();
        if candidate.is_empty() {
            continue;
        }
        if let Some(sha) = metadata.branch_sha(candidate).await? {
            tracing::debug!(branch = candidate, "using main branch");
            return Ok(if permalink {
                HeadReference::Sha(sha)
            } else {
                HeadReference::branch(candidate)
            });
        }
    }

    Err(ResolveError::NoMainBranch {
        candidates: candidates.join(", "),
    })
}

fn absolute_path(path: &Path) -> Result<PathBuf, ResolveError> {
    std::path::absolute(path)
        .map(|path| path.clean())
        .map_err(|error| LocalGitError::io(path, &error).into())
}

fn relative_to_root(location: &RepositoryLocation, path: &Path) -> Option<String> {
    let relative = location.relative_file_path(path);
    if relative.is_none() {
        tracing::debug!(path = %path.display(), "path is the repository root or outside it");
    }
    relative
}
