//! Link resolution and internal/external classification
//!
//! Anchors with an absolute href are compared against the crawled domain by
//! exact host equality; subdomains deliberately do NOT match, since that
//! choice decides which links drive further crawling. Relative hrefs are
//! resolved against the current page URL and are internal by construction.

use url::Url;

/// Whether a link targets the crawled domain or leaves it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Internal,
    External,
}

/// A resolved anchor with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLink {
    /// Absolute URL after resolution
    pub url: String,
    pub scope: LinkScope,
}

/// Classifies anchor hrefs relative to one crawled domain
pub struct LinkClassifier {
    domain: String,
}

impl LinkClassifier {
    /// Creates a classifier for the given domain name
    ///
    /// The name is compared verbatim against link hosts, so it should be
    /// exactly the host form the crawl targets (e.g. `example.com`).
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Resolves and classifies a single anchor href
    ///
    /// * Absolute href (parses on its own): internal when its host equals
    ///   the crawled domain exactly, external otherwise.
    /// * Relative href: resolved against `page_url`, always internal.
    /// * Hrefs that resolve to nothing usable return None and are not
    ///   counted.
    pub fn classify(&self, href: &str, page_url: &Url) -> Option<ClassifiedLink> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        match Url::parse(href) {
            Ok(absolute) => {
                let scope = if absolute.host_str().unwrap_or("") == self.domain {
                    LinkScope::Internal
                } else {
                    LinkScope::External
                };
                Some(ClassifiedLink {
                    url: absolute.to_string(),
                    scope,
                })
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let resolved = page_url.join(href).ok()?;
                Some(ClassifiedLink {
                    url: resolved.to_string(),
                    scope: LinkScope::Internal,
                })
            }
            Err(_) => None,
        }
    }
}
