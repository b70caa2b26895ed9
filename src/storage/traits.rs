//! Storage trait and error types

use crate::storage::InsightRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Write-only contract the crawl loop persists through
///
/// This is deliberately narrow: the crawler creates records and never
/// reads them back. Each Page/Insight pair is created together and is
/// immutable afterwards.
pub trait InsightStore {
    /// Idempotent create-or-fetch of a domain row by unique name
    fn ensure_domain(&mut self, name: &str) -> StorageResult<i64>;

    /// Creates a page row for a successfully rendered URL
    fn create_page(&mut self, domain_id: i64, url: &str, status_code: u16) -> StorageResult<i64>;

    /// Creates the insight row paired 1:1 with a page
    fn create_insight(&mut self, page_id: i64, insight: &InsightRecord) -> StorageResult<()>;
}
