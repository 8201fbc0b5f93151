//! Server configuration loaded from TOML.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level server configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listen address.
    pub bind: String,
    /// Generation backend settings.
    pub ollama: OllamaConfig,
    /// Content fetcher settings.
    pub scrape: ScrapeConfig,
}

/// Ollama backend settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Default model when a request carries none.
    pub model: String,
    /// Request timeout. Large models can take minutes.
    pub timeout_secs: u64,
}

/// Content fetcher settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Fetch timeout.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_owned(),
            ollama: OllamaConfig::default(),
            scrape: ScrapeConfig::default(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_owned(),
            model: ollama::DEFAULT_MODEL.to_owned(),
            timeout_secs: 600,
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Config {
    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("invalid configuration")
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.ollama.model, ollama::DEFAULT_MODEL);
        assert_eq!(config.ollama.timeout_secs, 600);
        assert_eq!(config.scrape.timeout_secs, 30);
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let config = Config::from_toml(
            r#"
            bind = "0.0.0.0:9000"

            [ollama]
            model = "mistral:7b"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.ollama.model, "mistral:7b");
        // Untouched fields keep their defaults.
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(Config::from_toml("bind = 42").is_err());
    }

    #[test]
    fn default_config_round_trips() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed = Config::from_toml(&rendered).unwrap();
        assert_eq!(parsed.bind, Config::default().bind);
    }
}
