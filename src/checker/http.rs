// src/checker/http.rs
// =============================================================================
// This module checks a single page: is it HTML, is it reachable, and does
// the validator accept it?
//
// Key functionality:
// - Makes an HTTP HEAD request first (lightweight, no body download)
// - Rejects anything that isn't text/html
// - Optionally insists on a 200 status code
// - Downloads the body with GET and hands it to the validator
//
// The crawler only sees the PageChecker trait, so tests can swap the
// network for a scripted fake.
//
// Rust concepts:
// - Traits: an interface the crawler is generic over
// - async/await: For network I/O
// - Result<T, E>: For error handling
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use super::CheckError;
use super::validator::{FetchedPage, Validator};

// Represents the result of checking a single page
//
// The body travels with the outcome even when the check failed: a page the
// validator rejected was still downloaded and its links are still followed.
#[derive(Debug)]
pub struct PageCheck {
    /// Whatever content was fetched (empty if the page was never downloaded)
    pub body: Vec<u8>,
    pub outcome: Result<(), CheckError>,
}

impl PageCheck {
    pub fn passed(body: Vec<u8>) -> Self {
        Self {
            body,
            outcome: Ok(()),
        }
    }

    pub fn failed(body: Vec<u8>, error: CheckError) -> Self {
        Self {
            body,
            outcome: Err(error),
        }
    }
}

/// Anything that can fetch and validate one page
#[allow(async_fn_in_trait)]
pub trait PageChecker {
    async fn check(&self, url: &Url) -> PageCheck;
}

/// Settings for the real, network-backed checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub validator: Url,
    /// Reject pages whose HEAD response isn't 200
    pub check_status_code: bool,
    /// Keep the validator's response body for rejected pages
    pub print_message: bool,
    pub timeout: Duration,
}

// Checks pages over HTTP and submits them to the validator
//
// We reuse one client for all requests (connection pooling)
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
    validator: Validator,
    check_status_code: bool,
}

impl HttpChecker {
    pub fn new(config: CheckerConfig) -> Result<Self, CheckError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let validator = Validator::new(client.clone(), config.validator, config.print_message);

        Ok(Self {
            client,
            validator,
            check_status_code: config.check_status_code,
        })
    }

    // Step 1: HEAD the page and decide if it's worth downloading
    async fn probe(&self, url: &Url) -> Result<(), CheckError> {
        let response = self.client.head(url.clone()).send().await?;
        let content_type = content_type(&response);
        tracing::debug!(page = %url, status = %response.status(), content_type = %content_type, "probed page");

        if !content_type.contains("text/html") {
            return Err(CheckError::UnsupportedContentType(content_type));
        }

        if self.check_status_code && response.status() != StatusCode::OK {
            return Err(CheckError::UnexpectedStatus(response.status().as_u16()));
        }

        Ok(())
    }

    // Step 2: GET the full body
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, CheckError> {
        let response = self.client.get(url.clone()).send().await?;
        let content_type = content_type(&response);
        let body = response.bytes().await?.to_vec();
        tracing::debug!(page = %url, bytes = body.len(), "fetched page");

        Ok(FetchedPage { body, content_type })
    }
}

impl PageChecker for HttpChecker {
    async fn check(&self, url: &Url) -> PageCheck {
        if let Err(e) = self.probe(url).await {
            return PageCheck::failed(Vec::new(), e);
        }

        let page = match self.fetch(url).await {
            Ok(page) => page,
            Err(e) => return PageCheck::failed(Vec::new(), e),
        };

        // Step 3: ask the validator
        match self.validator.submit(url, &page).await {
            Ok(()) => PageCheck::passed(page.body),
            Err(e) => PageCheck::failed(page.body, e),
        }
    }
}

fn content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const PAGE: &str = r#"<html><body><a href="/next">Next</a></body></html>"#;

    fn checker(server: &Server, check_status_code: bool) -> HttpChecker {
        HttpChecker::new(CheckerConfig {
            validator: Url::parse(&format!("{}/check", server.url())).unwrap(),
            check_status_code,
            print_message: false,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn page_url(server: &Server) -> Url {
        Url::parse(&format!("{}/page", server.url())).unwrap()
    }

    async fn serve_page(server: &mut Server, head_status: usize) {
        server
            .mock("HEAD", "/page")
            .with_status(head_status)
            .with_header("content-type", "text/html; charset=utf-8")
            .create_async()
            .await;
        server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(PAGE)
            .create_async()
            .await;
    }

    async fn validator_says(server: &mut Server, status: &str) -> mockito::Mock {
        server
            .mock("POST", "/check")
            .with_status(200)
            .with_header("X-W3C-Validator-Status", status)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_valid_page_passes_with_body() {
        let mut server = Server::new_async().await;
        serve_page(&mut server, 200).await;
        let validator = validator_says(&mut server, "Valid").await;

        let result = checker(&server, true).check(&page_url(&server)).await;

        assert!(result.outcome.is_ok());
        assert_eq!(result.body, PAGE.as_bytes());
        validator.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_page_still_returns_body() {
        let mut server = Server::new_async().await;
        serve_page(&mut server, 200).await;
        validator_says(&mut server, "Invalid").await;

        let result = checker(&server, true).check(&page_url(&server)).await;

        assert!(result.outcome.is_err());
        assert_eq!(result.body, PAGE.as_bytes());
        assert_eq!(result.outcome.unwrap_err().to_string(), "Invalid!");
    }

    #[tokio::test]
    async fn test_non_html_is_unsupported() {
        let mut server = Server::new_async().await;
        server
            .mock("HEAD", "/page")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;
        let get = server.mock("GET", "/page").expect(0).create_async().await;
        let validator = server.mock("POST", "/check").expect(0).create_async().await;

        let result = checker(&server, true).check(&page_url(&server)).await;

        assert!(result.body.is_empty());
        assert!(matches!(
            result.outcome,
            Err(CheckError::UnsupportedContentType(ref ct)) if ct == "image/png"
        ));
        get.assert_async().await;
        validator.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_status_rejected_when_checking_status() {
        let mut server = Server::new_async().await;
        server
            .mock("HEAD", "/page")
            .with_status(404)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let result = checker(&server, true).check(&page_url(&server)).await;

        assert!(result.body.is_empty());
        assert_eq!(result.outcome.unwrap_err().to_string(), "Status 404!");
    }

    #[tokio::test]
    async fn test_bad_status_ignored_when_not_checking_status() {
        let mut server = Server::new_async().await;
        serve_page(&mut server, 404).await;
        validator_says(&mut server, "Valid").await;

        let result = checker(&server, false).check(&page_url(&server)).await;

        assert!(result.outcome.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_page_is_transport_error() {
        // Nothing listens on port 9 (discard) on a test machine
        let config = CheckerConfig {
            validator: Url::parse("http://127.0.0.1:9/check").unwrap(),
            check_status_code: true,
            print_message: false,
            timeout: Duration::from_secs(5),
        };
        let checker = HttpChecker::new(config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let result = checker.check(&url).await;

        assert!(result.body.is_empty());
        assert!(matches!(result.outcome, Err(CheckError::Transport(_))));
    }
}
