// src/checker/mod.rs
// =============================================================================
// This module contains all page checking logic.
//
// Submodules:
// - http: HEAD/GET a page and drive the validation of one URL
// - validator: Uploads a page to the W3C validator
// - html: Extracts same-host links from page content
// - error: What can go wrong for a single page
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod error;
mod html;
mod http;
mod validator;

// Re-export public items from submodules
// This lets users write `checker::extract_html_links()` instead of
// `checker::html::extract_html_links()`
pub use error::CheckError;
pub use html::extract_html_links;
pub use http::{CheckerConfig, HttpChecker, PageCheck, PageChecker};
