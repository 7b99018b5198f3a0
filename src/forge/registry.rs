//! Ordered provider list with first-match resolution.

use std::sync::Arc;

use super::azure::AzureDevOps;
use super::bitbucket::Bitbucket;
use super::github::Github;
use super::gitlab::Gitlab;
use super::provider::{ForgeProvider, RemoteLookup, UrlRequest};
use super::settings::{ProviderKind, ResolverConfig};
use super::types::UrlBundle;

/// URLs produced by the provider that matched the repository's remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMatch {
    /// The forge that recognised the remote.
    pub provider: ProviderKind,
    /// Every URL it generated.
    pub urls: UrlBundle,
}

/// The fixed, ordered set of providers consulted for a request.
///
/// Order only matters when a remote could match more than one provider,
/// which default hostnames never do.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ForgeProvider>>,
}

impl ProviderRegistry {
    /// Builds every built-in provider over one remote lookup.
    #[must_use]
    pub fn new(config: &ResolverConfig, lookup: &Arc<dyn RemoteLookup>) -> Self {
        Self::from_providers(vec![
            Box::new(Github::new(config, Arc::clone(lookup))),
            Box::new(Gitlab::new(config, Arc::clone(lookup))),
            Box::new(Bitbucket::new(config, Arc::clone(lookup))),
            Box::new(AzureDevOps::new(config, Arc::clone(lookup))),
        ])
    }

    /// Builds a registry from an explicit provider list, consulted in order.
    #[must_use]
    pub const fn from_providers(providers: Vec<Box<dyn ForgeProvider>>) -> Self {
        Self { providers }
    }

    /// Returns the providers in consultation order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|provider| provider.kind()).collect()
    }

    /// Returns the URLs from the first provider that matches the remote.
    pub async fn resolve(&self, request: &UrlRequest<'_>) -> Option<ProviderMatch> {
        for provider in &self.providers {
            if let Some(urls) = provider.get_urls(request).await {
                return Some(ProviderMatch {
                    provider: provider.kind(),
                    urls,
                });
            }
        }
        tracing::debug!("no provider matched the remote");
        None
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.kinds())
            .finish()
    }
}
