//! Storage layer for crawl records
//!
//! The crawl loop consumes the narrow write-only [`InsightStore`] trait;
//! the SQLite backend adds a handful of read helpers for verification and
//! tests. Heading lists and ranked keywords are stored as JSON columns.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{InsightStore, StorageError, StorageResult};

use crate::analyze::KeywordDensity;

/// One stored page row
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub id: i64,
    pub domain_id: i64,
    pub url: String,
    pub status_code: u16,
    pub crawled_at: String,
}

/// The SEO signal bundle persisted 1:1 with a page
#[derive(Debug, Clone, Default)]
pub struct InsightRecord {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub p_count: usize,
    pub image_count: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub keywords: Vec<KeywordDensity>,
}
