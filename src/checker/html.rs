// src/checker/html.rs
// =============================================================================
// This module extracts same-host links from fetched pages.
//
// We deliberately do NOT parse the HTML into a DOM. Pages are scanned as raw
// bytes with one regular expression:
//
//     <a[^>]+href="([^"]+)"
//
// The scan is lossy: a tag without a closing quote simply doesn't
// match, single-quoted hrefs are ignored, and the page doesn't even need to
// be valid UTF-8.
//
// Only root-relative hrefs ("/docs", "/", "/x?y=1") are followed. They are
// turned into absolute URLs using the scheme and host of the ORIGIN url,
// which the crawler always sets to the start URL, never the page being
// scanned.
//
// Rust concepts:
// - Lazy statics: compile the regex once, reuse it for every page
// - Byte slices (&[u8]): work on raw page content without decoding it
// - percent_encode: turn non-UTF-8 href bytes into %XX escapes
// - Iterators: For processing collections
// =============================================================================

use once_cell::sync::Lazy;
use percent_encoding::{percent_encode, CONTROLS};
use regex::bytes::Regex;
use url::Url;

// (?-u) turns off Unicode mode so [^>] and [^"] match arbitrary bytes,
// including ones that are not valid UTF-8.
static HYPERLINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?-u)<a[^>]+href="([^"]+)""#).unwrap());

// Extracts all followable links from a page
//
// Parameters:
//   page: the raw page content (borrowed as &[u8])
//   origin: the URL whose scheme and host are used to build absolute links
//
// Returns: Vec<Url> in the order the anchors appear in the page.
// Duplicates are kept; the crawler deduplicates with its visited set.
//
// Example:
//   page   = "<a href='/x'>ignored</a><a href=\"/docs#top\">Docs</a>"
//   origin = "https://example.com/some/page"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(page: &[u8], origin: &Url) -> Vec<Url> {
    let mut links = Vec::new();
    let authority = authority(origin);

    for captures in HYPERLINK.captures_iter(page) {
        let href = &captures[1];

        if !is_root_relative(href) {
            continue;
        }

        if href.iter().any(u8::is_ascii_control) {
            eprintln!(
                "Warning: Skipping link {:?}: control character in URL",
                String::from_utf8_lossy(href)
            );
            continue;
        }

        // Raw bytes are kept as they are: anything outside ASCII is
        // percent-encoded byte for byte, so "/caf\xe9" becomes "/caf%E9"
        let path = percent_encode(href, CONTROLS);
        let absolute = format!("{}://{}{}", origin.scheme(), authority, path);
        match Url::parse(&absolute) {
            Ok(mut link) => {
                // Fragments point into the same page, so they are dropped
                link.set_fragment(None);
                links.push(link);
            }
            Err(e) => {
                eprintln!("Warning: Skipping link {}: {}", absolute, e);
            }
        }
    }

    links
}

// Decides if an href is a root-relative path on the same host
//
// "/docs" -> true
// "/"     -> true
// "//cdn.example.com/x" -> false (protocol-relative, might be another host)
// "docs", "https://...", "mailto:..." -> false
fn is_root_relative(href: &[u8]) -> bool {
    href.starts_with(b"/") && !href.starts_with(b"//")
}

// Builds "host[:port]" for the origin URL
//
// url::Url drops default ports (80 for http, 443 for https), so this is
// exactly the authority a browser would show.
fn authority(origin: &Url) -> String {
    let host = origin.host_str().unwrap_or("");
    match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
