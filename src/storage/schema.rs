//! Database schema definitions
//!
//! This module contains the SQL schema for the term index.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per indexed page; presence means "already indexed"
CREATE TABLE IF NOT EXISTS pages (
    url TEXT PRIMARY KEY,
    indexed_at TEXT NOT NULL,
    term_total INTEGER NOT NULL DEFAULT 0
);

-- Term frequencies per page
CREATE TABLE IF NOT EXISTS term_counts (
    url TEXT NOT NULL REFERENCES pages(url) ON DELETE CASCADE,
    term TEXT NOT NULL,
    count INTEGER NOT NULL,
    PRIMARY KEY (url, term)
);

CREATE INDEX IF NOT EXISTS idx_term_counts_term ON term_counts(term);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
