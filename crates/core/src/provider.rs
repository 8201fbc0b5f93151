//! Seams to the generative backend and the content fetcher.
//!
//! The orchestrator is generic over these traits so tests run against
//! in-memory fakes and the concrete clients stay in their own crates.

use crate::{Message, Result, WebPage};
use futures_core::Stream;
use tokio_util::sync::CancellationToken;

/// A generative text backend.
pub trait Generator: Send + Sync {
    /// Generate a full response for the ordered conversation.
    fn generate(
        &self,
        messages: &[Message],
        model: Option<&str>,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Stream response fragments for the ordered conversation.
    ///
    /// The stream ends when generation completes, when the backend
    /// closes the connection, or when `cancel` fires — whichever
    /// happens first.
    fn stream(
        &self,
        messages: &[Message],
        model: Option<&str>,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<String>> + Send;
}

/// An on-demand web content extractor.
pub trait Fetcher: Send + Sync {
    /// Fetch a URL and extract its title and body text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<WebPage>> + Send;
}
