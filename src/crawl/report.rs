// src/crawl/report.rs
// =============================================================================
// Machine-readable summary of a finished crawl (printed with --json).
// =============================================================================

use serde::Serialize;
use url::Url;

use super::visited::{PageResult, VisitedSet};

#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub validator: String,
    pub ok: usize,
    pub failed: usize,
    pub pages: Vec<PageResult>,
}

impl CrawlReport {
    pub fn new(start_url: &Url, validator: &Url, visited: &VisitedSet) -> Self {
        Self {
            start_url: start_url.to_string(),
            validator: validator.to_string(),
            ok: visited.ok_count(),
            failed: visited.failed_count(),
            pages: visited.pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let start = Url::parse("http://example.org/").unwrap();
        let validator = Url::parse("http://localhost:8080/check").unwrap();
        let mut visited = VisitedSet::new();
        visited.record(&start, true);
        visited.record(&Url::parse("http://example.org/a").unwrap(), false);

        let report = CrawlReport::new(&start, &validator, &visited);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["start_url"], "http://example.org/");
        assert_eq!(json["validator"], "http://localhost:8080/check");
        assert_eq!(json["ok"], 1);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["pages"][1]["url"], "http://example.org/a");
        assert_eq!(json["pages"][1]["ok"], false);
    }
}
