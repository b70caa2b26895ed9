//! HTML extraction pipeline
//!
//! Parses rendered HTML into the structured signals the crawler records:
//! title, meta description, heading sequences, paragraph/image counts,
//! anchor hrefs, and the page's visible text. Parsing rides on html5ever's
//! error recovery, so a single broken tag never aborts extraction for the
//! rest of the document.

use scraper::{Html, Selector};

/// Structured signals extracted from one rendered page
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    /// First `<title>` element's text, if present and non-empty
    pub title: Option<String>,

    /// `content` attribute of `<meta name="description">`, if present
    pub meta_description: Option<String>,

    /// Trimmed text of every h1/h2/h3 in document order, duplicates kept
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,

    /// Raw element counts, not deduplicated
    pub p_count: usize,
    pub image_count: usize,

    /// Ordered hrefs of every anchor that carries an href attribute
    pub anchors: Vec<String>,

    /// Visible body text, single-space separated and whitespace-collapsed
    pub text: String,
}

/// Parses rendered HTML into [`PageSignals`]
///
/// Extraction is best-effort throughout: selectors that fail to parse are
/// skipped rather than failing the page.
pub fn extract(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        h1: collect_heading_text(&document, "h1"),
        h2: collect_heading_text(&document, "h2"),
        h3: collect_heading_text(&document, "h3"),
        p_count: count_elements(&document, "p"),
        image_count: count_elements(&document, "img"),
        anchors: collect_anchors(&document),
        text: visible_text(&document),
    }
}

/// First title element's text, trimmed; None when absent or empty
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `content` attribute of the first `<meta name="description">` tag
fn extract_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='description']").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.to_string())
}

/// Trimmed text content of every matching heading, in document order
fn collect_heading_text(document: &Html, tag: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn count_elements(document: &Html, tag: &str) -> usize {
    match Selector::parse(tag) {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => 0,
    }
}

/// Every anchor href in document order; anchors without href are ignored
fn collect_anchors(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Body text joined with single spaces and whitespace-collapsed
fn visible_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|body| {
            body.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
