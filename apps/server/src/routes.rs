//! HTTP routes and error mapping.

use crate::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures_core::Stream;
use futures_util::StreamExt;
use pcore::{ChatRequest, Error};
use serde_json::json;
use std::convert::Infallible;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/stream", post(chat_stream))
        .route("/api/chat/models", get(models))
        .route("/api/chat/session/{session_id}", get(session))
        .with_state(state)
}

/// Engine error carried to an HTTP response.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Fetch { .. } | Error::Backend(_) => StatusCode::BAD_GATEWAY,
            Error::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, "request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn validate(request: &ChatRequest) -> Result<(), ApiError> {
    if request.message.trim().is_empty() {
        return Err(Error::Validation("message cannot be empty".to_owned()).into());
    }
    Ok(())
}

/// A per-turn cancellation token paired with a guard that fires it on
/// drop. Held by the handler future or SSE generator, so a client
/// disconnect cancels the turn.
fn turn_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// `POST /api/chat` — run one chat turn and return the full reply.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    validate(&request)?;
    let (cancel, _guard) = turn_token();
    let response = state.engine.chat(request, cancel).await?;
    Ok(Json(response).into_response())
}

/// `POST /api/chat/stream` — run one chat turn, relaying reply
/// fragments as SSE `data:` events. The stream ends with a `[DONE]`
/// sentinel; a mid-stream failure is surfaced as a JSON error event
/// instead of the sentinel.
async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    validate(&request)?;
    let (cancel, guard) = turn_token();
    let engine = state.engine.clone();
    let events = async_stream::stream! {
        let _guard = guard;
        let fragments = engine.chat_stream(request, cancel);
        futures_util::pin_mut!(fragments);
        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => yield Ok(Event::default().data(text)),
                Err(err) => {
                    tracing::warn!("stream failed: {err}");
                    let body = json!({ "error": err.to_string() }).to_string();
                    yield Ok(Event::default().data(body));
                    return;
                }
            }
        }
        yield Ok(Event::default().data("[DONE]"));
    };
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// `GET /api/chat/models` — list models available on the backend.
async fn models(State(state): State<AppState>) -> Result<Response, ApiError> {
    let models = state.ollama.models().await?;
    Ok(Json(models).into_response())
}

/// `GET /api/chat/session/{session_id}` — return a session snapshot.
async fn session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.engine.session(&session_id).await {
        Some(session) => Json(session).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Session not found" })),
        )
            .into_response(),
    }
}
