//! Shared application state.

use crate::Config;
use engine::ChatEngine;
use ollama::Ollama;
use scrape::Scraper;
use std::{sync::Arc, time::Duration};

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat orchestrator over the Ollama backend and the web fetcher.
    pub engine: Arc<ChatEngine<Ollama, Scraper>>,
    /// Direct handle to the backend for model listing.
    pub ollama: Ollama,
}

impl AppState {
    /// Build the engine and its HTTP clients from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Separate clients: generation can run for minutes while page
        // fetches should give up quickly.
        let ollama_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ollama.timeout_secs))
            .build()?;
        let scrape_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.scrape.timeout_secs))
            .build()?;

        let ollama = Ollama::new(
            ollama_client,
            &config.ollama.base_url,
            &config.ollama.model,
        );
        let scraper = Scraper::new(scrape_client);

        Ok(Self {
            engine: Arc::new(ChatEngine::new(ollama.clone(), scraper)),
            ollama,
        })
    }
}
