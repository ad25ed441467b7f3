// src/crawl/visited.rs
// =============================================================================
// The visited set: every URL the crawler has checked, with its outcome.
//
// A URL becomes a key the moment it is checked and stays there for the rest
// of the run, whatever the outcome. That is the crawler's only protection
// against cycles, so keys are never removed or re-checked.
//
// Keys are the serialized, fragment-free URL ("http://example.org/a"), so
// "/a#top" and "/a#bottom" share one entry.
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// One checked page, as reported in the JSON summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub url: String,
    pub ok: bool,
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    outcomes: HashMap<String, bool>,
    // First-visit order, for reporting
    order: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for a URL.
    ///
    /// Returns false (and keeps the first outcome) if the URL was already
    /// recorded.
    pub fn record(&mut self, url: &Url, ok: bool) -> bool {
        let key = url.as_str();
        if self.outcomes.contains_key(key) {
            return false;
        }
        self.outcomes.insert(key.to_string(), ok);
        self.order.push(key.to_string());
        true
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.outcomes.contains_key(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn ok_count(&self) -> usize {
        self.outcomes.values().filter(|ok| **ok).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.ok_count()
    }

    /// All checked pages in the order they were first visited
    pub fn pages(&self) -> Vec<PageResult> {
        self.order
            .iter()
            .map(|url| PageResult {
                url: url.clone(),
                ok: self.outcomes[url],
            })
            .collect()
    }
}
