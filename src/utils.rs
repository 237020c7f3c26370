//! Small text helpers used by the scrapers and for logging.
//!
//! - Whitespace normalisation for scraped element text
//! - HTML fragment flattening for feed summaries
//! - String truncation for log lines

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace (including newlines and NBSP) into single
/// spaces and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_whitespace("  a\n\t b  "), "a b");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Text content of an element, normalised. Text nodes are concatenated as
/// they appear, so inline markup never splits a word.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Flatten an HTML fragment (as shipped inside feed summaries) into plain
/// text. Text nodes are space-joined so adjacent blocks stay separate.
pub fn html_fragment_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    normalize_whitespace(&html.root_element().text().join(" "))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis appended.
/// Cuts always land on a character boundary.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("abcdef", 3), "abc...");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\t b  "), "a b");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("one\u{a0}two"), "one two");
    }

    #[test]
    fn test_element_text_joins_nested_nodes() {
        let html = Html::parse_fragment("<p>It was <b>very</b>\n dark.</p>");
        let selector = Selector::parse("p").unwrap();
        let p = html.select(&selector).next().unwrap();
        assert_eq!(element_text(p), "It was very dark.");
    }

    #[test]
    fn test_html_fragment_text() {
        let text = html_fragment_text("<div><p>Lights flickered.</p><p>Then silence.</p></div>");
        assert_eq!(text, "Lights flickered. Then silence.");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(50);
        assert_eq!(truncate_for_log(&s, 30), format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("ééééé", 2), "éé...");
    }
}
