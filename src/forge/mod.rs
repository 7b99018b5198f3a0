//! Forge providers that turn a repository remote into browse URLs.
//!
//! Each supported forge (GitHub, GitLab, Bitbucket, Azure DevOps) is a
//! [`ForgeProvider`]: it recognises its own remotes by hostname and renders
//! blob, blame, history, compare, pull request, and repository URLs in its
//! own grammar. [`ProviderRegistry`] consults them in a fixed order and the
//! first match wins.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use forgelink::forge::{ProviderRegistry, RemoteLookup, ResolverConfig, SelectionRange, UrlRequest};
//! use forgelink::local::{GitMetadata, HeadReference};
//!
//! # async fn run() {
//! let lookup: Arc<dyn RemoteLookup> = Arc::new(GitMetadata::new("/work/widgets/.git"));
//! let registry = ProviderRegistry::new(&ResolverConfig::default(), &lookup);
//! let head = HeadReference::branch("main");
//! let request = UrlRequest {
//!     selection: Some(SelectionRange::lines(0, 0)),
//!     head: &head,
//!     relative_file_path: Some("src/app.ts"),
//! };
//! if let Some(found) = registry.resolve(&request).await {
//!     println!("{:?}", found.urls.blob_url);
//! }
//! # }
//! ```

mod azure;
mod bitbucket;
mod github;
mod gitlab;
mod provider;
mod registry;
mod remote;
mod segments;
mod settings;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use azure::AzureDevOps;
pub use bitbucket::Bitbucket;
pub use github::Github;
pub use gitlab::Gitlab;
pub use provider::{ForgeProvider, ProviderSettings, RemoteLookup, UrlRequest, normalize_hostname};
pub use registry::{ProviderMatch, ProviderRegistry};
pub use remote::{ParsedRemote, parse_remote};
pub use settings::{
    DEFAULT_MAIN_BRANCH, DEFAULT_REMOTE, ProviderConfig, ProviderKind, ResolverConfig,
};
pub use types::{OrgRepoInfo, SelectionPoint, SelectionRange, UrlBundle, UrlVariant};

#[cfg(test)]
pub use provider::MockRemoteLookup;
