//! Ollama backend client.
//!
//! Speaks the Ollama HTTP protocol: `POST /api/generate` with a flat
//! prompt (single-shot or newline-delimited JSON streaming) and
//! `GET /api/tags` for model listing. Conversation history is rendered
//! into the prompt by [`prompt`]; fragment concatenation is the
//! caller's responsibility.

use anyhow::anyhow;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use pcore::{Error, Generator, Message, Result};
use tokio_util::sync::CancellationToken;
use wire::{GenerateRequest, GenerateResponse, StreamLine, TagsResponse};

pub use wire::ModelInfo;

mod prompt;
mod wire;

/// Model used when a request carries none.
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

/// HTTP client for an Ollama server.
#[derive(Clone)]
pub struct Ollama {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl Ollama {
    /// Create a client for the server at `base_url`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            model: model.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List the models available on the server.
    ///
    /// Missing name/digest/modified fields are substituted with safe
    /// placeholders rather than failing the whole call.
    pub async fn models(&self) -> Result<Vec<ModelInfo>> {
        tracing::debug!("listing available models");
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(Error::backend)?;
        if !response.status().is_success() {
            return Err(Error::backend(anyhow!(
                "model listing returned {}",
                response.status()
            )));
        }

        let payload: TagsResponse = response.json().await.map_err(Error::backend)?;
        Ok(payload.models.into_iter().map(ModelInfo::from).collect())
    }
}

impl Generator for Ollama {
    async fn generate(&self, messages: &[Message], model: Option<&str>) -> Result<String> {
        let model = model.unwrap_or(&self.model);
        tracing::debug!("generating response with model {model}");

        let body = GenerateRequest {
            model,
            prompt: prompt::render(messages),
            stream: false,
        };
        let response = self
            .client
            .post(self.endpoint("/api/generate"))
            .json(&body)
            .send()
            .await
            .map_err(Error::backend)?;
        if !response.status().is_success() {
            return Err(Error::backend(anyhow!(
                "generate returned {}",
                response.status()
            )));
        }

        let payload: GenerateResponse = response.json().await.map_err(Error::backend)?;
        payload
            .response
            .ok_or_else(|| Error::backend(anyhow!("payload has no response field")))
    }

    fn stream(
        &self,
        messages: &[Message],
        model: Option<&str>,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<String>> + Send {
        let model = model.unwrap_or(&self.model).to_owned();
        tracing::debug!("streaming response with model {model}");

        let request = self.client.post(self.endpoint("/api/generate")).json(
            &GenerateRequest {
                model: &model,
                prompt: prompt::render(messages),
                stream: true,
            },
        );

        try_stream! {
            let response = request.send().await.map_err(Error::backend)?;
            if !response.status().is_success() {
                Err(Error::backend(anyhow!(
                    "generate returned {}",
                    response.status()
                )))?;
            }

            // Buffer raw bytes and decode per complete line: a
            // multi-byte character may arrive split across network
            // chunks.
            let mut body = response.bytes_stream();
            let mut buf: Vec<u8> = Vec::new();
            let mut finished = false;
            'read: loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(Error::Cancelled),
                    next = body.next() => next.transpose().map_err(Error::backend),
                };
                let Some(bytes) = next? else { break };
                buf.extend_from_slice(&bytes);

                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = line.trim_ascii();
                    // The protocol interleaves keep-alive blank lines.
                    if line.is_empty() {
                        continue;
                    }
                    let chunk: StreamLine =
                        serde_json::from_slice(line).map_err(Error::backend)?;
                    if let Some(text) = chunk.response {
                        yield text;
                    }
                    if chunk.done {
                        finished = true;
                        break 'read;
                    }
                }
            }

            // The final line may arrive without a trailing newline.
            if !finished {
                let line = buf.trim_ascii();
                if !line.is_empty() {
                    let chunk: StreamLine =
                        serde_json::from_slice(line).map_err(Error::backend)?;
                    if let Some(text) = chunk.response {
                        yield text;
                    }
                }
            }
        }
    }
}
