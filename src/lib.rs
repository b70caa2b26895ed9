//! Sitelens: a single-domain SEO insight crawler
//!
//! This crate crawls one web domain starting from its sitemap (or root),
//! renders each page in a headless browser, extracts SEO-relevant signals,
//! and persists them as structured Domain/Page/Insight records.

pub mod analyze;
pub mod crawler;
pub mod extract;
pub mod links;
pub mod policy;
pub mod storage;

use thiserror::Error;

/// Main error type for Sitelens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Browser failed to start: {0}")]
    BrowserInit(String),

    #[error("Navigation timeout for {url}")]
    NavigationTimeout { url: String },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Sitelens operations
pub type Result<T> = std::result::Result<T, LensError>;

// Re-export commonly used types
pub use analyze::{KeywordAnalyzer, KeywordDensity};
pub use crawler::{CrawlOptions, CrawlReport};
pub use extract::{extract, PageSignals};
pub use links::{ClassifiedLink, LinkClassifier, LinkScope};
pub use policy::PolicyGate;
pub use storage::{InsightStore, SqliteStore};
