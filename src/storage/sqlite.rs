//! SQLite implementation of the insight store

use crate::analyze::KeywordDensity;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{InsightStore, StorageResult};
use crate::storage::{InsightRecord, PageRecord};
use crate::LensError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and initializes the schema
    pub fn new(path: &Path) -> Result<Self, LensError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, LensError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===== Read helpers (verification and tests only; the crawler writes
    // through the InsightStore trait and never reads) =====

    /// Looks up a domain ID by name
    pub fn get_domain_id(&self, name: &str) -> StorageResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM domains WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Counts domain rows
    pub fn count_domains(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM domains", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Counts all stored pages
    pub fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Counts pages stored for a given URL
    pub fn count_pages_with_url(&self, url: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Fetches a page row by URL
    pub fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>> {
        let page = self
            .conn
            .query_row(
                "SELECT id, domain_id, url, status_code, crawled_at FROM pages WHERE url = ?1",
                params![url],
                |row| {
                    Ok(PageRecord {
                        id: row.get(0)?,
                        domain_id: row.get(1)?,
                        url: row.get(2)?,
                        status_code: row.get(3)?,
                        crawled_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(page)
    }

    /// Fetches the insight paired with a page
    pub fn get_insight(&self, page_id: i64) -> StorageResult<Option<InsightRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT title, meta_description, h1, h2, h3, p_count, image_count,
                 internal_links, external_links, keywords
                 FROM insights WHERE page_id = ?1",
                params![page_id],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, i64>(5)?,
                        row.get::<_, i64>(6)?,
                        row.get::<_, i64>(7)?,
                        row.get::<_, i64>(8)?,
                        row.get::<_, String>(9)?,
                    ))
                },
            )
            .optional()?;

        let Some((title, meta_description, h1, h2, h3, p, img, internal, external, keywords)) = row
        else {
            return Ok(None);
        };

        Ok(Some(InsightRecord {
            title,
            meta_description,
            h1: serde_json::from_str::<Vec<String>>(&h1)?,
            h2: serde_json::from_str::<Vec<String>>(&h2)?,
            h3: serde_json::from_str::<Vec<String>>(&h3)?,
            p_count: p as usize,
            image_count: img as usize,
            internal_links: internal as usize,
            external_links: external as usize,
            keywords: serde_json::from_str::<Vec<KeywordDensity>>(&keywords)?,
        }))
    }
}

impl InsightStore for SqliteStore {
    fn ensure_domain(&mut self, name: &str) -> StorageResult<i64> {
        if let Some(id) = self.get_domain_id(name)? {
            return Ok(id);
        }

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO domains (name, created_at) VALUES (?1, ?2)",
            params![name, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_page(&mut self, domain_id: i64, url: &str, status_code: u16) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO pages (domain_id, url, status_code, crawled_at) VALUES (?1, ?2, ?3, ?4)",
            params![domain_id, url, status_code, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_insight(&mut self, page_id: i64, insight: &InsightRecord) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO insights (page_id, title, meta_description, h1, h2, h3,
             p_count, image_count, internal_links, external_links, keywords)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                page_id,
                insight.title,
                insight.meta_description,
                serde_json::to_string(&insight.h1)?,
                serde_json::to_string(&insight.h2)?,
                serde_json::to_string(&insight.h3)?,
                insight.p_count as i64,
                insight.image_count as i64,
                insight.internal_links as i64,
                insight.external_links as i64,
                serde_json::to_string(&insight.keywords)?,
            ],
        )?;
        Ok(())
    }
}
