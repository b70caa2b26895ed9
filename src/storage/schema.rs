//! Database schema definitions

/// SQL schema for the insight database
pub const SCHEMA_SQL: &str = r#"
-- Crawled domains, one row per unique name
CREATE TABLE IF NOT EXISTS domains (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Successfully rendered pages
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    domain_id INTEGER NOT NULL REFERENCES domains(id),
    url TEXT NOT NULL,
    status_code INTEGER NOT NULL,
    crawled_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_domain ON pages(domain_id);
CREATE INDEX IF NOT EXISTS idx_pages_url ON pages(url);

-- SEO signals, exactly one row per page
CREATE TABLE IF NOT EXISTS insights (
    page_id INTEGER PRIMARY KEY REFERENCES pages(id),
    title TEXT,
    meta_description TEXT,
    h1 TEXT NOT NULL DEFAULT '[]',
    h2 TEXT NOT NULL DEFAULT '[]',
    h3 TEXT NOT NULL DEFAULT '[]',
    p_count INTEGER NOT NULL DEFAULT 0,
    image_count INTEGER NOT NULL DEFAULT 0,
    internal_links INTEGER NOT NULL DEFAULT 0,
    external_links INTEGER NOT NULL DEFAULT 0,
    keywords TEXT NOT NULL DEFAULT '[]'
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
