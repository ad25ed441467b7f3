// src/checker/validator.rs
// =============================================================================
// This module talks to the W3C markup validator.
//
// The validator (https://validator.w3.org/ or a local copy, usually at
// http://localhost:8080/check) accepts a file upload and reports the result
// in a response header:
//
//     X-W3C-Validator-Status: Valid | Invalid | Abort
//
// The upload is a multipart form with two fields:
// - uploaded_file: the page content, named after the page URL
// - output:        "soap12" (the machine-readable output mode)
// =============================================================================

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use super::CheckError;

const STATUS_HEADER: &str = "x-w3c-validator-status";
const ERRORS_HEADER: &str = "x-w3c-validator-errors";
const WARNINGS_HEADER: &str = "x-w3c-validator-warnings";

/// A page body together with the content type it was served with
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Client for one validator endpoint
#[derive(Debug, Clone)]
pub struct Validator {
    client: Client,
    endpoint: Url,
    print_message: bool,
}

impl Validator {
    pub fn new(client: Client, endpoint: Url, print_message: bool) -> Self {
        Self {
            client,
            endpoint,
            print_message,
        }
    }

    // Uploads one page and interprets the validator's verdict
    //
    // Returns Ok(()) only for "Valid". A missing status header counts as a
    // rejection with an empty status, just like any other unexpected value.
    pub async fn submit(&self, page_url: &Url, page: &FetchedPage) -> Result<(), CheckError> {
        let form = build_form(page_url, page)?;

        tracing::debug!(page = %page_url, validator = %self.endpoint, "submitting page");
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let headers = response.headers();
        let status = header_text(headers, STATUS_HEADER);
        tracing::debug!(
            page = %page_url,
            status = %status,
            errors = %header_text(headers, ERRORS_HEADER),
            warnings = %header_text(headers, WARNINGS_HEADER),
            "validator answered"
        );

        if status == "Valid" {
            return Ok(());
        }

        let body = if self.print_message {
            Some(response.text().await)
        } else {
            None
        };

        Err(rejection(status, body))
    }
}

// Turns a non-"Valid" answer into an error
//
// The verdict stands even when the validator's body can't be read; the
// message is just left out.
fn rejection<E: std::fmt::Display>(status: String, body: Option<Result<String, E>>) -> CheckError {
    let message = match body {
        Some(Ok(text)) => Some(text),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "could not read validator response");
            None
        }
        None => None,
    };

    CheckError::Rejected { status, message }
}

// Builds the multipart upload for a page
//
// reqwest escapes backslashes and double quotes in the file name itself, so
// the page URL is passed through untouched.
fn build_form(page_url: &Url, page: &FetchedPage) -> Result<Form, CheckError> {
    let mut part = Part::bytes(page.body.clone()).file_name(page_url.to_string());
    if !page.content_type.is_empty() {
        part = part.mime_str(&page.content_type)?;
    }

    Ok(Form::new()
        .part("uploaded_file", part)
        .text("output", "soap12"))
}

fn header_text(headers: &reqwest::header::HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn page() -> FetchedPage {
        FetchedPage {
            body: b"<!DOCTYPE html><title>t</title>".to_vec(),
            content_type: "text/html; charset=utf-8".to_string(),
        }
    }

    fn page_url() -> Url {
        Url::parse("http://example.org/page").unwrap()
    }

    fn validator(server: &Server, print_message: bool) -> Validator {
        let endpoint = Url::parse(&format!("{}/check", server.url())).unwrap();
        Validator::new(Client::new(), endpoint, print_message)
    }

    #[tokio::test]
    async fn test_valid_page_is_accepted() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/check")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(
                    r#"name="uploaded_file"; filename="http://example\.org/page""#.to_string(),
                ),
                Matcher::Regex("Content-Type: text/html; charset=utf-8".to_string()),
                Matcher::Regex("<title>t</title>".to_string()),
                Matcher::Regex(r#"name="output"\s+soap12"#.to_string()),
            ]))
            .with_status(200)
            .with_header("X-W3C-Validator-Status", "Valid")
            .create_async()
            .await;

        let result = validator(&server, false).submit(&page_url(), &page()).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_page_is_rejected_without_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/check")
            .with_status(200)
            .with_header("X-W3C-Validator-Status", "Invalid")
            .with_header("X-W3C-Validator-Errors", "3")
            .with_body("<env:Envelope/>")
            .create_async()
            .await;

        let err = validator(&server, false)
            .submit(&page_url(), &page())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid!");
        assert_eq!(err.validator_message(), None);
    }

    #[tokio::test]
    async fn test_print_message_keeps_validator_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/check")
            .with_status(200)
            .with_header("X-W3C-Validator-Status", "Invalid")
            .with_body("<env:Envelope/>")
            .create_async()
            .await;

        let err = validator(&server, true)
            .submit(&page_url(), &page())
            .await
            .unwrap_err();

        assert_eq!(err.validator_message(), Some("<env:Envelope/>"));
    }

    #[test]
    fn test_unreadable_message_keeps_rejection() {
        let body: Option<Result<String, &str>> = Some(Err("connection reset"));
        let err = rejection("Invalid".to_string(), body);

        assert_eq!(err.to_string(), "Invalid!");
        assert_eq!(err.validator_message(), None);
    }

    #[test]
    fn test_readable_message_is_kept() {
        let body: Option<Result<String, &str>> = Some(Ok("<env:Envelope/>".to_string()));
        let err = rejection("Invalid".to_string(), body);

        assert_eq!(err.validator_message(), Some("<env:Envelope/>"));
    }

    #[tokio::test]
    async fn test_missing_status_header_is_a_rejection() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/check")
            .with_status(500)
            .create_async()
            .await;

        let err = validator(&server, false)
            .submit(&page_url(), &page())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "!");
    }
}
