//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the IndexStore trait.

use crate::document::{Document, TermCounter};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{IndexStore, StorageError, StorageResult};
use crate::storage::IndexedPage;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// SQLite index backend
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Creates a new SqliteIndex instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened/created database
    /// * `Err(IndexerError)` - Failed to open database
    pub fn new(path: &Path) -> crate::Result<Self> {
        let conn = open_connection(path).map_err(StorageError::from)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> crate::Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(StorageError::from)?;
        initialize_schema(&conn).map_err(StorageError::from)?;
        Ok(Self { conn })
    }
}

impl IndexStore for SqliteIndex {
    // ===== Crawl Contract =====

    fn is_indexed(&self, url: &str) -> StorageResult<bool> {
        let existing: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM pages WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(existing.is_some())
    }

    fn index_page(&mut self, url: &str, document: &Document) -> StorageResult<()> {
        let counter = TermCounter::from_document(document);
        let now = Utc::now().to_rfc3339();

        // Replace any previous counts for this URL atomically
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM term_counts WHERE url = ?1", params![url])?;
        tx.execute(
            "INSERT INTO pages (url, indexed_at, term_total) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET
                 indexed_at = excluded.indexed_at,
                 term_total = excluded.term_total",
            params![url, now, counter.total() as i64],
        )?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO term_counts (url, term, count) VALUES (?1, ?2, ?3)")?;
            for (term, count) in counter.iter() {
                stmt.execute(params![url, term, count])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Indexed {} ({} distinct terms)", url, counter.len());
        Ok(())
    }

    // ===== Queries =====

    fn get_counts(&self, term: &str) -> StorageResult<HashMap<String, u32>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, count FROM term_counts WHERE term = ?1")?;

        let counts = stmt
            .query_map(params![term], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(counts)
    }

    fn get_urls(&self, term: &str) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url FROM term_counts WHERE term = ?1 ORDER BY url")?;

        let urls = stmt
            .query_map(params![term], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(urls)
    }

    fn term_count(&self, url: &str, term: &str) -> StorageResult<u32> {
        let count: Option<u32> = self
            .conn
            .query_row(
                "SELECT count FROM term_counts WHERE url = ?1 AND term = ?2",
                params![url, term],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0))
    }

    fn get_page(&self, url: &str) -> StorageResult<Option<IndexedPage>> {
        let page = self
            .conn
            .query_row(
                "SELECT url, indexed_at, term_total FROM pages WHERE url = ?1",
                params![url],
                |row| {
                    Ok(IndexedPage {
                        url: row.get(0)?,
                        indexed_at: row.get(1)?,
                        term_total: row.get::<_, i64>(2)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(page)
    }

    // ===== Statistics =====

    fn count_indexed(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_terms(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT term) FROM term_counts", [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }

    // ===== Administration =====

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute_batch(
            "
            DELETE FROM term_counts;
            DELETE FROM pages;
        ",
        )?;
        tracing::info!("Cleared all index entries");
        Ok(())
    }
}

/// Opens a database connection and initializes the schema
///
/// # Arguments
///
/// * `path` - Path to the database file
///
/// # Returns
///
/// * `Ok(Connection)` - Database connection
/// * `Err(rusqlite::Error)` - Failed to open or initialize
fn open_connection(path: &Path) -> Result<Connection, rusqlite::Error> {
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

    Ok(conn)
}
