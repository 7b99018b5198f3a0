//! Explicit configuration threaded into providers.
//!
//! Providers never read ambient configuration; everything they need arrives
//! through [`ResolverConfig`] so they can be built from fabricated values in
//! tests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Remote queried when neither the provider nor the caller names one.
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch tried when anchoring to a main branch and nothing is configured.
pub const DEFAULT_MAIN_BRANCH: &str = "main";

/// Identifies a supported forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// GitHub and GitHub Enterprise.
    Github,
    /// GitLab, hosted or self-managed.
    Gitlab,
    /// Bitbucket Cloud and Server.
    Bitbucket,
    /// Azure DevOps Services.
    Azure,
}

impl ProviderKind {
    /// Every provider, in registry order.
    pub const ALL: [Self; 4] = [Self::Github, Self::Gitlab, Self::Bitbucket, Self::Azure];

    /// Returns the configuration key for this provider.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Azure => "azure",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-provider overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Extra hostnames to match, in addition to the provider defaults.
    pub hostnames: Vec<String>,
    /// Remote to query instead of the global default.
    pub remote: Option<String>,
}

/// Configuration for one resolution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Remote queried when a provider has no override.
    pub default_remote: String,
    /// Candidate branch names for main-branch anchoring, tried in order.
    pub main_branches: Vec<String>,
    /// Overrides keyed by provider.
    pub providers: BTreeMap<ProviderKind, ProviderConfig>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_remote: DEFAULT_REMOTE.to_owned(),
            main_branches: vec![DEFAULT_MAIN_BRANCH.to_owned()],
            providers: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Returns the overrides for `kind`, or empty overrides.
    #[must_use]
    pub fn provider(&self, kind: ProviderKind) -> ProviderConfig {
        self.providers.get(&kind).cloned().unwrap_or_default()
    }

    /// Returns the remote `kind` should query.
    ///
    /// The provider override wins over the global default, which wins over
    /// [`DEFAULT_REMOTE`]. Blank values count as unset.
    #[must_use]
    pub fn remote_for(&self, kind: ProviderKind) -> String {
        let provider_remote = self
            .providers
            .get(&kind)
            .and_then(|config| config.remote.as_deref())
            .map(str::trim)
            .filter(|remote| !remote.is_empty());

        provider_remote.map_or_else(|| self.global_remote(), str::to_owned)
    }

    /// Returns the remote queried by providers without an override.
    #[must_use]
    pub fn global_remote(&self) -> String {
        let configured = self.default_remote.trim();
        if configured.is_empty() {
            DEFAULT_REMOTE.to_owned()
        } else {
            configured.to_owned()
        }
    }
}
