//! Forgelink library crate linking local files to hosted git forges.
//!
//! The library reads a repository's metadata straight from disk (HEAD,
//! refs, packed refs, config, and submodule gitlinks), matches its remote
//! against GitHub, GitLab, Bitbucket, and Azure DevOps, and builds blob,
//! blame, history, compare, pull request, and repository URLs. It also maps
//! a forge blob URL back to a local file and selection.

pub mod config;
pub mod forge;
pub mod local;
pub mod open_url;
pub mod resolve;

pub use config::{ForgelinkConfig, OperationMode};
pub use forge::{ProviderKind, ResolverConfig, SelectionRange, UrlBundle, UrlVariant};
pub use open_url::{FileOpenRequest, OpenUrlError, UrlLocation, open_from_url, parse_forge_url};
pub use resolve::{Document, ResolveError, ResolveRequest, ResolvedUrl, UrlFlags, resolve_url};
