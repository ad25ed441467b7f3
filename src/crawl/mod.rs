// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a URL
// - Only follows root-relative links, so it never leaves the start host
// - Every page is checked exactly once per run (the visited set)
// - Optional JSON summary of everything that was checked
//
// Rust concepts:
// - Collections: HashMap for the visited set, Vec as the work-list stack
// =============================================================================

mod driver;
mod report;
mod visited;

// Re-export the crawler and its report
pub use driver::Crawler;
pub use report::CrawlReport;
