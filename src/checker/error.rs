// src/checker/error.rs
// =============================================================================
// Everything that can go wrong while checking a single page.
//
// None of these abort the crawl: the crawler prints them next to the page's
// [ERROR] line, records the page as failed and keeps going.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The page isn't HTML (images, PDFs, feeds, ...). Always skipped.
    #[error("{0} not supported")]
    UnsupportedContentType(String),

    /// HEAD returned something other than 200 while status checking is on
    #[error("Status {0}!")]
    UnexpectedStatus(u16),

    /// The validator answered with a status other than "Valid"
    #[error("{status}!")]
    Rejected {
        status: String,
        /// The validator's response body, kept only with --print-message
        message: Option<String>,
    },

    /// Network, TLS or request building failures
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl CheckError {
    /// The validator's own explanation, if it was asked for
    pub fn validator_message(&self) -> Option<&str> {
        match self {
            CheckError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
