//! Fetcher tests against a mock HTTP server.

use pagetalk_scrape::Scraper;
use pcore::{Error, Fetcher};

#[tokio::test]
async fn fetch_extracts_title_and_content() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/page")
        .match_header("user-agent", mockito::Matcher::Regex("Mozilla".into()))
        .with_header("content-type", "text/html")
        .with_body(
            "<html><head><title>Example Domain</title></head>\
             <body><article>This domain is for examples.</article></body></html>",
        )
        .create_async()
        .await;

    let url = format!("{}/page", server.url());
    let page = Scraper::new(reqwest::Client::new()).fetch(&url).await.unwrap();

    assert_eq!(page.url, url);
    assert_eq!(page.title, "Example Domain");
    assert_eq!(page.content, "This domain is for examples.");
}

#[tokio::test]
async fn fetch_fails_on_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let url = format!("{}/missing", server.url());
    let err = Scraper::new(reqwest::Client::new())
        .fetch(&url)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}
