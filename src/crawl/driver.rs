// src/crawl/driver.rs
// =============================================================================
// This module walks a website depth-first, validating every page it finds.
//
// How it works:
// 1. Start with the start URL on a stack
// 2. Pop a URL; skip it if it is already in the visited set
// 3. Check it (fetch + validate) and print [OK] or [ERROR]
// 4. Extract same-host links from whatever content came back
// 5. Push the links in reverse so the first link is popped next
// 6. Repeat until the stack is empty
//
// This produces exactly the order a recursive walk would: a page's links are
// explored one by one, each one's whole subtree before the next sibling, and
// a sibling that got visited inside an earlier subtree is skipped silently.
//
// There is no depth limit. The walk ends because every checked URL becomes a
// permanent key in the visited set.
//
// Rust concepts:
// - Generics: the crawler works with any PageChecker
// - Vec as a stack: push()/pop() for depth-first search
// - impl Write: output goes to any writer, so tests can capture it
// =============================================================================

use std::io::{self, Write};
use url::Url;

use super::visited::VisitedSet;
use crate::checker::{extract_html_links, PageCheck, PageChecker};

// Represents a page waiting on the work-list
#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    depth: usize, // How many links away from the starting URL (logging only)
}

pub struct Crawler<C> {
    checker: C,
    recursive: bool,
    visited: VisitedSet,
}

impl<C: PageChecker> Crawler<C> {
    /// recursive = false checks only the page it is given
    pub fn new(checker: C, recursive: bool) -> Self {
        Self {
            checker,
            recursive,
            visited: VisitedSet::new(),
        }
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    // Checks a page and, in recursive mode, every same-host page reachable
    // from it
    //
    // Parameters:
    //   page: the first page to check
    //   start: the URL whose scheme and host every discovered link is
    //          resolved against (normally the same as page)
    //   out: receives "[OK] {url}" lines
    //   err: receives "[ERROR] {url}" lines and failure details
    //
    // Only writing to out/err can fail; page failures are recorded and the
    // walk continues.
    pub async fn recursive_check<O: Write, E: Write>(
        &mut self,
        page: Url,
        start: &Url,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        if !self.recursive {
            self.check_and_report(&page, out, err).await?;
            return Ok(());
        }

        let mut stack = vec![CrawlItem {
            url: page,
            depth: 0,
        }];

        while let Some(item) = stack.pop() {
            if self.visited.contains(&item.url) {
                continue;
            }

            tracing::debug!(depth = item.depth, page = %item.url, pending = stack.len(), "checking page");
            let body = self.check_and_report(&item.url, out, err).await?;

            let links = extract_html_links(&body, start);
            tracing::debug!(page = %item.url, links = links.len(), "extracted links");

            for link in links.into_iter().rev() {
                if !self.visited.contains(&link) {
                    stack.push(CrawlItem {
                        url: link,
                        depth: item.depth + 1,
                    });
                }
            }
        }

        Ok(())
    }

    // Checks one page, prints the verdict and records it
    //
    // Returns the fetched content, which may be empty (or partial) when the
    // check failed.
    pub async fn check_and_report<O: Write, E: Write>(
        &mut self,
        url: &Url,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Vec<u8>> {
        let check: PageCheck = self.checker.check(url).await;

        match &check.outcome {
            Ok(()) => {
                writeln!(out, "[OK] {}", url)?;
                self.visited.record(url, true);
            }
            Err(e) => {
                writeln!(err, "[ERROR] {}", url)?;
                writeln!(err, "{}", e)?;
                if let Some(message) = e.validator_message() {
                    writeln!(err, "{}", message)?;
                }
                self.visited.record(url, false);
            }
        }

        Ok(check.body)
    }
}
