//! Message normalizer — URL extraction and message cleaning.

use regex::Regex;
use std::sync::LazyLock;

/// Characters commonly trailing a URL as sentence punctuation.
const TRAILING: [char; 7] = [',', '.', ';', '!', '?', ')', ':'];

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).expect("url regex is valid")
});

/// Result of normalizing a raw chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The message with URL substrings removed and trimmed.
    ///
    /// When removal would leave nothing while URLs were found, this
    /// reverts to the original input so the orchestrator can decide
    /// what a URL-only message means.
    pub cleaned: String,

    /// Extracted URLs in order of appearance, trailing punctuation
    /// stripped.
    pub urls: Vec<String>,

    url_only: bool,
}

impl Parsed {
    /// Whether any URLs were found.
    pub fn has_urls(&self) -> bool {
        !self.urls.is_empty()
    }

    /// Whether the message consisted solely of URLs, i.e. removing
    /// them left nothing.
    pub fn url_only(&self) -> bool {
        self.url_only
    }
}

/// Extract URLs from `message` and produce a cleaned copy.
///
/// URL matching is case-insensitive on the scheme and bounded by
/// whitespace or delimiter characters. Reported URLs have common
/// trailing punctuation stripped; removal operates on the raw match,
/// punctuation included. Blank input yields an empty result.
pub fn parse(message: &str) -> Parsed {
    if message.trim().is_empty() {
        return Parsed {
            cleaned: String::new(),
            urls: Vec::new(),
            url_only: false,
        };
    }

    let urls: Vec<String> = URL_RE
        .find_iter(message)
        .map(|m| m.as_str().trim_end_matches(TRAILING).to_owned())
        .collect();

    let cleaned = URL_RE.replace_all(message, "").trim().to_owned();

    // A message that was nothing but URLs must not be silently emptied.
    if cleaned.is_empty() && !urls.is_empty() {
        return Parsed {
            cleaned: message.to_owned(),
            urls,
            url_only: true,
        };
    }

    Parsed {
        cleaned,
        urls,
        url_only: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_short_circuits() {
        for input in ["", "   ", "\n\t"] {
            let parsed = parse(input);
            assert_eq!(parsed.cleaned, "");
            assert!(parsed.urls.is_empty());
            assert!(!parsed.has_urls());
            assert!(!parsed.url_only());
        }
    }

    #[test]
    fn no_urls_passes_through() {
        let parsed = parse("What is test");
        assert_eq!(parsed.cleaned, "What is test");
        assert!(parsed.urls.is_empty());
    }

    #[test]
    fn extracts_url_and_cleans() {
        let parsed = parse("Check https://example.com, thanks!");
        assert_eq!(parsed.urls, ["https://example.com"]);
        // The raw match includes the trailing comma, so removal takes
        // it too, leaving a double space.
        assert_eq!(parsed.cleaned, "Check  thanks!");
        assert!(!parsed.url_only());
    }

    #[test]
    fn trailing_punctuation_stripped_from_reported_urls() {
        for (input, expected) in [
            ("see https://a.io.", "https://a.io"),
            ("see https://a.io;", "https://a.io"),
            ("see https://a.io!", "https://a.io"),
            ("see https://a.io?", "https://a.io"),
            ("(see https://a.io)", "https://a.io"),
            ("see https://a.io:", "https://a.io"),
        ] {
            let parsed = parse(input);
            assert_eq!(parsed.urls, [expected], "input: {input}");
        }
    }

    #[test]
    fn multiple_urls_preserve_order() {
        let parsed = parse("first https://one.test then http://two.test end");
        assert_eq!(parsed.urls, ["https://one.test", "http://two.test"]);
        assert_eq!(parsed.cleaned, "first  then  end");
    }

    #[test]
    fn cleaned_contains_no_extracted_urls() {
        let parsed = parse("a https://x.example/path?q=1 b http://y.example c");
        for url in &parsed.urls {
            assert!(!parsed.cleaned.contains(url.as_str()));
        }
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let parsed = parse("go to HTTPS://Example.COM/page now");
        assert_eq!(parsed.urls, ["HTTPS://Example.COM/page"]);
    }

    #[test]
    fn url_only_message_keeps_original() {
        let parsed = parse("https://example.com");
        assert_eq!(parsed.cleaned, "https://example.com");
        assert_eq!(parsed.urls, ["https://example.com"]);
        assert!(parsed.url_only());
    }

    #[test]
    fn two_urls_only_keeps_original() {
        let input = "https://a.test https://b.test";
        let parsed = parse(input);
        assert_eq!(parsed.cleaned, input);
        assert_eq!(parsed.urls, ["https://a.test", "https://b.test"]);
        assert!(parsed.url_only());
    }
}
