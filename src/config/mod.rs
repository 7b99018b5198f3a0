//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach. Providers never read this
//! struct directly: [`ForgelinkConfig::resolver_config`] converts it into
//! the explicit [`ResolverConfig`] threaded through resolution.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.forgelink.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `FORGELINK_REMOTE`,
//!    `FORGELINK_GITHUB_HOSTNAMES`, and so on
//! 4. **Command-line arguments** – `--remote`, `--path`/`-p`, `--blame`/`-b`
//!
//! # Configuration File
//!
//! Place `.forgelink.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! remote = "upstream"
//! main_branches = "main,master,trunk,dev,develop"
//! github_hostnames = "github.mycompany.com"
//! gitlab_hostnames = "gitlab.internal,git.example.com:8443"
//! gitlab_remote = "mirror"
//! ```

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::forge::{
    DEFAULT_MAIN_BRANCH, ProviderConfig, ProviderKind, ResolverConfig, SelectionPoint,
    SelectionRange,
};
use crate::resolve::{ResolveError, UrlFlags};

/// Workspace searched by `--from-url` when none is configured.
const DEFAULT_WORKSPACE: &str = ".";

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Produce a forge URL for a local file or workspace.
    ResolveUrl,
    /// Find the local file a forge URL points at.
    OpenFromUrl,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// List-valued settings (`main_branches`, `*_hostnames`, `workspace`) are
/// comma-separated strings so every layer can express them the same way.
///
/// Boolean flags are read from the CLI and configuration files only;
/// `ortho_config` does not load boolean values from the environment.
///
/// # Example
///
/// ```no_run
/// use forgelink::ForgelinkConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ForgelinkConfig::load().expect("failed to load configuration");
/// let resolver = config.resolver_config();
/// assert!(!resolver.main_branches.is_empty());
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FORGELINK",
    discovery(
        dotfile_name = ".forgelink.toml",
        config_file_name = "forgelink.toml",
        app_name = "forgelink"
    )
)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag maps to one CLI switch"
)]
pub struct ForgelinkConfig {
    /// Remote queried when a forge has no override. Defaults to `origin`.
    ///
    /// Can be provided via:
    /// - CLI: `--remote <NAME>`
    /// - Environment: `FORGELINK_REMOTE`
    /// - Config file: `remote = "..."`
    #[ortho_config(cli_short = 'R')]
    pub remote: Option<String>,

    /// Comma-separated branch names tried, in order, by `--main-branch`.
    ///
    /// Defaults to `main`.
    #[ortho_config(cli_short = 'M')]
    pub main_branches: Option<String>,

    /// Extra GitHub Enterprise hostnames, comma-separated.
    #[ortho_config(cli_short = 'g')]
    pub github_hostnames: Option<String>,

    /// Remote queried for GitHub instead of `remote`.
    #[ortho_config(cli_short = 'G')]
    pub github_remote: Option<String>,

    /// Extra self-managed GitLab hostnames, comma-separated.
    #[ortho_config(cli_short = 'j')]
    pub gitlab_hostnames: Option<String>,

    /// Remote queried for GitLab instead of `remote`.
    #[ortho_config(cli_short = 'J')]
    pub gitlab_remote: Option<String>,

    /// Extra Bitbucket Server hostnames, comma-separated.
    #[ortho_config(cli_short = 'k')]
    pub bitbucket_hostnames: Option<String>,

    /// Remote queried for Bitbucket instead of `remote`.
    #[ortho_config(cli_short = 'K')]
    pub bitbucket_remote: Option<String>,

    /// Extra Azure DevOps Server hostnames, comma-separated.
    #[ortho_config(cli_short = 'z')]
    pub azure_hostnames: Option<String>,

    /// Remote queried for Azure DevOps instead of `remote`.
    #[ortho_config(cli_short = 'Z')]
    pub azure_remote: Option<String>,

    /// File, `file://` URI, or directory to link to. Defaults to the
    /// current directory.
    ///
    /// Can be provided via:
    /// - CLI: `--path <PATH>` or `-p <PATH>`
    #[ortho_config(cli_short = 'p')]
    pub path: Option<String>,

    /// First selected line, counted from 1.
    #[ortho_config(cli_short = 'l')]
    pub line: Option<u32>,

    /// Last selected line, counted from 1. Defaults to `line`.
    #[ortho_config(cli_short = 'e')]
    pub end_line: Option<u32>,

    /// Column on the first line, counted from 1.
    #[ortho_config(cli_short = 'c')]
    pub column: Option<u32>,

    /// Column on the last line, counted from 1.
    #[ortho_config(cli_short = 'E')]
    pub end_column: Option<u32>,

    /// Links to the blame view.
    #[ortho_config(cli_short = 'b')]
    pub blame: bool,

    /// Anchors the link to a commit instead of a branch.
    #[ortho_config(cli_short = 'P')]
    pub permalink: bool,

    /// Anchors the link to the first existing branch in `main_branches`.
    #[ortho_config(cli_short = 'm')]
    pub main_branch: bool,

    /// Links to the repository home page.
    #[ortho_config(cli_short = 'r')]
    pub repo: bool,

    /// Links to the file history.
    #[ortho_config(cli_short = 'H')]
    pub history: bool,

    /// Links to a new pull or merge request.
    #[ortho_config(cli_short = 'n')]
    pub pr: bool,

    /// Links to the compare view.
    #[ortho_config(cli_short = 'C')]
    pub compare: bool,

    /// Prints every generated URL as JSON instead of one URL.
    #[ortho_config(cli_short = 'a')]
    pub all: bool,

    /// Forge URL to map back to a local file.
    ///
    /// Can be provided via:
    /// - CLI: `--from-url <URL>` or `-u <URL>`
    #[ortho_config(cli_short = 'u')]
    pub from_url: Option<String>,

    /// Comma-separated workspace roots searched by `--from-url`. Defaults to
    /// the current directory.
    #[ortho_config(cli_short = 'w')]
    pub workspace: Option<String>,
}

impl ForgelinkConfig {
    /// Determines the operation mode from the provided configuration.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.from_url.is_some() {
            OperationMode::OpenFromUrl
        } else {
            OperationMode::ResolveUrl
        }
    }

    /// Builds the explicit configuration threaded into providers.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut main_branches = split_list(self.main_branches.as_deref());
        if main_branches.is_empty() {
            main_branches.push(DEFAULT_MAIN_BRANCH.to_owned());
        }

        let mut config = ResolverConfig {
            main_branches,
            ..ResolverConfig::default()
        };
        if let Some(remote) = non_blank(self.remote.as_deref()) {
            config.default_remote = remote;
        }

        for kind in ProviderKind::ALL {
            let (hostnames, remote) = self.provider_fields(kind);
            let provider = ProviderConfig {
                hostnames: split_list(hostnames),
                remote: non_blank(remote),
            };
            if provider != ProviderConfig::default() {
                config.providers.insert(kind, provider);
            }
        }

        config
    }

    /// Converts the one-based CLI selection to a zero-based range.
    ///
    /// Returns `Ok(None)` when no line is given.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Configuration`] when a line or column is
    /// zero, when the end line precedes the start line, or when an end or
    /// column is given without a start line.
    pub fn selection(&self) -> Result<Option<SelectionRange>, ResolveError> {
        let Some(line) = self.line else {
            if self.end_line.is_some() || self.column.is_some() || self.end_column.is_some() {
                return Err(configuration("--end-line and columns require --line"));
            }
            return Ok(None);
        };

        let end_line = self.end_line.unwrap_or(line);
        if end_line < line {
            return Err(configuration("--end-line must not precede --line"));
        }

        let start = SelectionPoint {
            line: zero_based(line, "--line")?,
            column: self
                .column
                .map(|column| zero_based(column, "--column"))
                .transpose()?,
        };
        let end = SelectionPoint {
            line: zero_based(end_line, "--end-line")?,
            column: self
                .end_column
                .map(|column| zero_based(column, "--end-column"))
                .transpose()?,
        };

        Ok(Some(SelectionRange::between(start, end)))
    }

    /// Returns the URL flags set on the command line.
    #[must_use]
    pub const fn flags(&self) -> UrlFlags {
        UrlFlags {
            blame: self.blame,
            permalink: self.permalink,
            main_branch: self.main_branch,
            open_repo: self.repo,
            history: self.history,
            open_pr: self.pr,
            compare: self.compare,
        }
    }

    /// Returns the workspace roots searched by `--from-url`.
    #[must_use]
    pub fn workspace_roots(&self) -> Vec<PathBuf> {
        let roots = split_list(self.workspace.as_deref());
        if roots.is_empty() {
            return vec![PathBuf::from(DEFAULT_WORKSPACE)];
        }
        roots.into_iter().map(PathBuf::from).collect()
    }

    /// Returns the document input, defaulting to the current directory.
    #[must_use]
    pub fn document_input(&self) -> &str {
        non_blank_str(self.path.as_deref()).unwrap_or(DEFAULT_WORKSPACE)
    }

    fn provider_fields(&self, kind: ProviderKind) -> (Option<&str>, Option<&str>) {
        let (hostnames, remote) = match kind {
            ProviderKind::Github => (&self.github_hostnames, &self.github_remote),
            ProviderKind::Gitlab => (&self.gitlab_hostnames, &self.gitlab_remote),
            ProviderKind::Bitbucket => (&self.bitbucket_hostnames, &self.bitbucket_remote),
            ProviderKind::Azure => (&self.azure_hostnames, &self.azure_remote),
        };
        (hostnames.as_deref(), remote.as_deref())
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn non_blank_str(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    non_blank_str(raw).map(str::to_owned)
}

fn zero_based(value: u32, flag: &str) -> Result<u32, ResolveError> {
    value
        .checked_sub(1)
        .ok_or_else(|| configuration(&format!("{flag} is counted from 1")))
}

fn configuration(message: &str) -> ResolveError {
    ResolveError::Configuration {
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests;
