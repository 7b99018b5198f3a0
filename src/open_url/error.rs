//! Errors raised while mapping a forge URL back to a local file.

use thiserror::Error;

/// Errors that may occur while opening a file from a forge URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OpenUrlError {
    /// The input is not an absolute URL.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser error detail.
        message: String,
    },

    /// The URL has no file path after the revision segment.
    #[error("URL does not name a file: {url}")]
    MissingPath {
        /// The rejected input.
        url: String,
    },

    /// No workspace root contains the file.
    #[error("could not find {path} in any workspace")]
    FileNotFound {
        /// Repository-relative path that was looked for.
        path: String,
    },
}
