//! Extracted web page content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain-text content extracted from a web page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebPage {
    /// The page URL.
    pub url: String,

    /// The page title (`"Untitled"` when the document has none).
    pub title: String,

    /// Extracted body text, whitespace-collapsed.
    pub content: String,

    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl WebPage {
    /// Create a page record with the current timestamp.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            fetched_at: Utc::now(),
        }
    }
}
