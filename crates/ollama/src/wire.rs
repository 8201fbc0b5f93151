//! Wire types for the Ollama HTTP protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub stream: bool,
}

/// Non-streaming response payload.
#[derive(Deserialize)]
pub(crate) struct GenerateResponse {
    pub response: Option<String>,
}

/// One line of the streaming response body.
#[derive(Deserialize)]
pub(crate) struct StreamLine {
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
}

/// Response payload of `GET /api/tags`.
#[derive(Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<RawModel>,
}

/// A model entry as the server reports it.
#[derive(Deserialize)]
pub(crate) struct RawModel {
    pub name: Option<String>,
    pub digest: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// A model descriptor with human-readable fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    /// Model name (`"unknown"` when the server omits it).
    pub name: String,
    /// Identity digest (empty when the server omits it).
    pub digest: String,
    /// Human-readable size, e.g. `"1.5 GB"`.
    pub size: String,
    /// Human-readable last-modified time.
    pub modified: String,
}

impl From<RawModel> for ModelInfo {
    fn from(raw: RawModel) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "unknown".to_owned()),
            digest: raw.digest.unwrap_or_default(),
            size: format_bytes(raw.size),
            modified: raw
                .modified_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown".to_owned()),
        }
    }
}

/// Render a byte count with B/KB/MB/GB/TB suffixes, at most one
/// decimal place.
fn format_bytes(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut suffix = 0;
    while size >= 1024.0 && suffix < SUFFIXES.len() - 1 {
        size /= 1024.0;
        suffix += 1;
    }

    let mut rendered = format!("{size:.1}");
    if let Some(whole) = rendered.strip_suffix(".0") {
        rendered.truncate(whole.len());
    }
    format!("{rendered} {}", SUFFIXES[suffix])
}
