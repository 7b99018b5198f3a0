//! Failures surfaced to the user when a URL cannot be produced.

use thiserror::Error;

use crate::forge::UrlVariant;
use crate::local::LocalGitError;

/// Errors that may occur while resolving a document to a forge URL.
///
/// Every variant is recoverable; the caller reports it and carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The document is not backed by a file on disk.
    #[error("only files on disk can be linked, got {uri}")]
    NotAFile {
        /// The document's URI.
        uri: String,
    },

    /// No `.git` entry was found in the path or any parent.
    #[error("could not find a git repository containing {path}")]
    NoRepository {
        /// The path the search started from.
        path: String,
    },

    /// `HEAD` is missing or names a branch with no commit.
    #[error("could not resolve HEAD")]
    NoHead,

    /// None of the main-branch candidates exist.
    #[error("none of the main branches exist: {candidates}")]
    NoMainBranch {
        /// Comma-separated candidates that were tried.
        candidates: String,
    },

    /// The remote matches no known forge.
    #[error("remote {remote} does not match any configured forge")]
    NoProviderMatch {
        /// Remote name queried by the default provider configuration.
        remote: String,
    },

    /// A forge matched but produced neither the requested URL nor a
    /// fallback.
    #[error("could not create a {variant} URL")]
    NoUrl {
        /// The URL kind that was requested.
        variant: UrlVariant,
    },

    /// Reading repository metadata failed.
    #[error(transparent)]
    Git(#[from] LocalGitError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Detail of the configuration problem.
        message: String,
    },
}
