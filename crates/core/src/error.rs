//! Error taxonomy shared across the workspace.
//!
//! A turn aborts on the first failure: no retries, no
//! catch-and-continue. The HTTP boundary translates each variant into
//! a status code.

use thiserror::Error;

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of a chat turn.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed or missing request field.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The content source could not be fetched or parsed.
    #[error("failed to fetch content from {url}")]
    Fetch {
        /// The URL that failed.
        url: String,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// The generation backend call failed or returned an unusable payload.
    #[error("backend generation failed")]
    Backend(#[source] anyhow::Error),

    /// The caller withdrew interest.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Wrap a fetch failure for `url`.
    pub fn fetch(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Wrap a backend failure.
    pub fn backend(source: impl Into<anyhow::Error>) -> Self {
        Self::Backend(source.into())
    }
}
