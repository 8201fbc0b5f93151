//! Chat turn orchestration.
//!
//! Both the single-shot and streaming paths share the same shape:
//! normalize the message, resolve the session, inject page content
//! when a new URL appears, append the user turn, invoke the backend,
//! and persist the assistant turn. A failed fetch or generation aborts
//! the turn; turns already appended stay recorded.

use crate::SessionStore;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use pcore::{
    ChatRequest, ChatResponse, Error, Fetcher, Generator, Result, Role, Session, WebPage, parse,
};
use tokio_util::sync::CancellationToken;

/// Question substituted when a message consists solely of a URL.
pub const DEFAULT_QUESTION: &str = "What is this page about?";

/// The control-flow hub between normalizer, store, fetcher, and
/// backend.
pub struct ChatEngine<G, F> {
    backend: G,
    fetcher: F,
    store: SessionStore,
}

impl<G: Generator, F: Fetcher> ChatEngine<G, F> {
    /// Create an engine with an empty session store.
    pub fn new(backend: G, fetcher: F) -> Self {
        Self {
            backend,
            fetcher,
            store: SessionStore::new(),
        }
    }

    /// The underlying session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Read-only session lookup.
    pub async fn session(&self, id: &str) -> Option<Session> {
        self.store.snapshot(id).await
    }

    /// Process a single-shot chat turn.
    pub async fn chat(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<ChatResponse> {
        tracing::info!("processing chat request");
        let entry = self.store.resolve(request.session_id.as_deref()).await;
        let mut session = entry.lock().await;
        let web_url = self.prepare(&request, &mut session, &cancel).await?;

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = self
                .backend
                .generate(&session.messages, request.model.as_deref()) => result?,
        };

        session.push(Role::Assistant, text.clone());
        tracing::info!(session = %session.id, "chat turn complete");
        Ok(ChatResponse {
            message: text,
            session_id: session.id.clone(),
            web_url,
            model: request.model,
        })
    }

    /// Process a streaming chat turn.
    ///
    /// Fragments are relayed as they arrive; only the running
    /// concatenation is buffered, and it becomes one assistant turn
    /// once the backend completes. A stream that errors out ends
    /// without appending an assistant turn, but fragments already
    /// emitted are not retracted.
    pub fn chat_stream(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<String>> + Send + '_ {
        try_stream! {
            tracing::info!("processing streaming chat request");
            let entry = self.store.resolve(request.session_id.as_deref()).await;
            let mut session = entry.lock().await;
            self.prepare(&request, &mut session, &cancel).await?;

            let mut full = String::new();
            {
                let inner = self.backend.stream(
                    &session.messages,
                    request.model.as_deref(),
                    cancel.clone(),
                );
                futures_util::pin_mut!(inner);
                while let Some(fragment) = inner.next().await {
                    let fragment = fragment?;
                    full.push_str(&fragment);
                    yield fragment;
                }
            }

            session.push(Role::Assistant, full);
            tracing::info!(session = %session.id, "streaming chat turn complete");
        }
    }

    /// Steps shared by both paths: normalize, resolve the content URL,
    /// inject page content, append the user turn. Runs under the
    /// session lock.
    async fn prepare(
        &self,
        request: &ChatRequest,
        session: &mut Session,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let parsed = parse(&request.message);
        let web_url = request
            .web_url
            .clone()
            .or_else(|| parsed.urls.first().cloned());

        // Fetch only when the resolved URL differs from what the
        // session already has injected.
        if let Some(url) = &web_url
            && session.page_url.as_deref() != Some(url.as_str())
        {
            tracing::info!("fetching content from {url}");
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                page = self.fetcher.fetch(url) => page?,
            };
            session.page_url = Some(url.clone());
            session.push(Role::System, context_message(&page));
        }

        let text = if parsed.has_urls() {
            if parsed.url_only() {
                DEFAULT_QUESTION.to_owned()
            } else {
                parsed.cleaned
            }
        } else {
            request.message.clone()
        };
        if !text.trim().is_empty() {
            session.push(Role::User, text);
        }

        Ok(web_url)
    }
}

/// The fixed grounding template for injected page content.
fn context_message(page: &WebPage) -> String {
    format!(
        "You have been provided with the following web page content from {}:\n\n\
         Title: {}\n\n\
         Content: {}\n\n\
         Please answer questions based on this content.",
        page.url, page.title, page.content
    )
}
