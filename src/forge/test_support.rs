//! Test doubles for the remote lookup seam.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::provider::RemoteLookup;

/// Serves remote URLs from a fixed map and records every name asked for.
#[derive(Debug, Default)]
pub struct StaticRemoteLookup {
    remotes: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticRemoteLookup {
    /// Serves `url` for the `origin` remote.
    #[must_use]
    pub fn origin(url: &str) -> Self {
        Self::with_remotes(&[("origin", url)])
    }

    /// Serves each `(name, url)` pair.
    #[must_use]
    pub fn with_remotes(remotes: &[(&str, &str)]) -> Self {
        Self {
            remotes: remotes
                .iter()
                .map(|(name, url)| ((*name).to_owned(), (*url).to_owned()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Returns the remote names looked up so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteLookup for StaticRemoteLookup {
    async fn remote_url(&self, remote_name: &str) -> Option<String> {
        if let Ok(mut names) = self.requested.lock() {
            names.push(remote_name.to_owned());
        }
        self.remotes.get(remote_name).cloned()
    }
}
