//! Web content fetcher.
//!
//! Downloads a page and extracts its title and main body text as
//! whitespace-collapsed plain text. Extraction prefers common content
//! containers over the whole document.

use anyhow::anyhow;
use pcore::{Error, Fetcher, Result, WebPage};
use scraper::{Html, Selector};

/// User-Agent sent with fetch requests; many sites reject requests
/// without a browser-like one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Content container selectors, most specific first.
const CONTENT_SELECTORS: [&str; 5] = ["article", "main", "#content", ".content", "body"];

/// HTTP fetcher with HTML text extraction.
#[derive(Clone)]
pub struct Scraper {
    client: reqwest::Client,
}

impl Scraper {
    /// Create a fetcher using the given HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for Scraper {
    async fn fetch(&self, url: &str) -> Result<WebPage> {
        tracing::debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?;
        if !response.status().is_success() {
            return Err(Error::fetch(url, anyhow!("status {}", response.status())));
        }

        let html = response.text().await.map_err(|e| Error::fetch(url, e))?;
        let (title, content) = extract(&html);
        tracing::debug!("fetched {url}: {} chars of content", content.len());
        Ok(WebPage::new(url, title, content))
    }
}

/// Extract `(title, content)` from an HTML document.
///
/// Title falls back to `"Untitled"`. Content comes from the first
/// matching container in [`CONTENT_SELECTORS`], else the whole
/// document, with all whitespace runs collapsed to single spaces.
pub fn extract(html: &str) -> (String, String) {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").expect("title selector is valid");
    let title = document
        .select(&title_selector)
        .next()
        .map(|node| collapse(&node.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_owned());

    let content = CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .next()
                .map(|node| node.text().collect::<String>())
        })
        .unwrap_or_else(|| document.root_element().text().collect());

    (title, collapse(&content))
}

/// Collapse all whitespace runs to single spaces and trim.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
