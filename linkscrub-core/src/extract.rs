//! extract.rs - Candidate-link extraction from free text.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A candidate hyperlink: a scheme plus everything up to the next whitespace.
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("static URL pattern compiles"));

/// Extracts candidate links from `content`, de-duplicated and in
/// first-seen order.
pub fn extract_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_PATTERN
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
