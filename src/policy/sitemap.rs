//! Sitemap fetching and `<loc>` extraction
//!
//! Streams the sitemap XML through the sitemap crate's reader so large
//! documents never need a DOM. Both urlset entries and nested sitemap
//! index entries contribute their `<loc>` text, in document order.

use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::io::Cursor;
use std::time::Duration;

/// Fetches `{origin}/sitemap.xml` and returns its `<loc>` URLs in order
///
/// Returns an empty list on fetch failure, non-200 status, or a sitemap
/// with no `<loc>` entries; the caller decides the root fallback.
pub(crate) async fn seed_urls(client: &Client, origin: &str, timeout: Duration) -> Vec<String> {
    let sitemap_url = format!("{}/sitemap.xml", origin);

    let response = match client.get(&sitemap_url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("sitemap fetch failed for {}: {}", sitemap_url, e);
            return Vec::new();
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        tracing::debug!(
            "sitemap fetch for {} returned {}",
            sitemap_url,
            response.status()
        );
        return Vec::new();
    }

    match response.text().await {
        Ok(body) => parse_locs(&body),
        Err(e) => {
            tracing::debug!("sitemap body read failed for {}: {}", sitemap_url, e);
            Vec::new()
        }
    }
}

/// Collects every `<loc>` element's text in document order
pub(crate) fn parse_locs(xml: &str) -> Vec<String> {
    let cursor = Cursor::new(xml.as_bytes().to_vec());
    let mut urls = Vec::new();

    for entity in SiteMapReader::new(cursor) {
        match entity {
            SiteMapEntity::Url(entry) => {
                if let Some(loc) = entry.loc.get_url() {
                    urls.push(loc.to_string());
                }
            }
            SiteMapEntity::SiteMap(entry) => {
                if let Some(loc) = entry.loc.get_url() {
                    urls.push(loc.to_string());
                }
            }
            SiteMapEntity::Err(_) => {}
        }
    }

    urls
}
