use std::collections::HashSet;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A saved business. Display fields are cached at bookmark time because the
/// business record itself is not locally durable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub business_id: String,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: String,
}

/// A user-submitted review. Append-only, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub business_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
}

/// Aggregate review numbers for one business
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewStats {
    pub count: u32,
    pub average: Option<f64>,
}

/// Local store over SQLite
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Battle-tested and reliable
/// - Doesn't require a separate process
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // Initialize schema on first run
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// In-memory store, for tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                business_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                location TEXT,
                rating REAL,
                review_count INTEGER,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                business_id TEXT NOT NULL,
                rating INTEGER NOT NULL CHECK(rating >= 1 AND rating <= 5),
                comment TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // --- Bookmarks ---

    /// Save a bookmark. Bookmarking an already-bookmarked business is a no-op.
    pub fn add_bookmark(
        &self,
        business_id: &str,
        name: &str,
        location: &str,
        rating: f64,
        review_count: u32,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO bookmarks
             (business_id, name, location, rating, review_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                business_id,
                name,
                location,
                rating,
                review_count,
                Utc::now().to_rfc3339(),
            ],
        )?;

        debug!(business_id, inserted = changed > 0, "add_bookmark");
        Ok(())
    }

    /// Delete a bookmark. Removing a non-bookmarked business is a no-op.
    pub fn remove_bookmark(&self, business_id: &str) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM bookmarks WHERE business_id = ?1",
            params![business_id],
        )?;

        debug!(business_id, deleted = changed > 0, "remove_bookmark");
        Ok(())
    }

    pub fn is_bookmarked(&self, business_id: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM bookmarks WHERE business_id = ?1",
                params![business_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    /// All bookmarks, most recent first
    pub fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(
            "SELECT business_id, name, location, rating, review_count, created_at
             FROM bookmarks ORDER BY created_at DESC, business_id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Bookmark {
                business_id: row.get(0)?,
                name: row.get(1)?,
                location: row.get(2)?,
                rating: row.get(3)?,
                review_count: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(row?);
        }
        Ok(bookmarks)
    }

    /// Bookmarked ids as a set, for enriching a page of search results in one
    /// query instead of one per row
    pub fn bookmarked_ids(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT business_id FROM bookmarks")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = HashSet::new();
        for row in rows {
            ids.insert(row?);
        }
        Ok(ids)
    }

    // --- Reviews ---

    /// Append a review. Range validation happens upstream; the CHECK
    /// constraint is the backstop.
    pub fn add_review(&self, business_id: &str, rating: u8, comment: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO reviews (business_id, rating, comment, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![business_id, rating, comment, Utc::now().to_rfc3339()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Reviews for one business in creation order, oldest first
    pub fn reviews_for(&self, business_id: &str) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, business_id, rating, comment, created_at
             FROM reviews WHERE business_id = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![business_id], |row| {
            Ok(Review {
                id: row.get(0)?,
                business_id: row.get(1)?,
                rating: row.get(2)?,
                comment: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut reviews = Vec::new();
        for row in rows {
            reviews.push(row?);
        }
        Ok(reviews)
    }

    /// Count and average rating of local reviews for one business
    pub fn review_stats(&self, business_id: &str) -> Result<ReviewStats> {
        let (count, average): (u32, Option<f64>) = self.conn.query_row(
            "SELECT COUNT(*), AVG(rating) FROM reviews WHERE business_id = ?1",
            params![business_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(ReviewStats { count, average })
    }
}
