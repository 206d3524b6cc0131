use crate::domain::error::DomainError;
use crate::domain::ports::page_cache::PageCache;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::debug;

/// SQLite-backed page cache. Entries older than the TTL are treated as
/// missing and can be purged.
pub struct SqlitePageCache {
    conn: Mutex<Connection>,
    ttl: Duration,
}

impl SqlitePageCache {
    pub fn open(path: &str, ttl: Duration) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::Cache(format!("DB error: {e}")))?;
        if path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Cache(format!("WAL error: {e}")))?;
        }
        Self::new(conn, ttl)
    }

    pub fn new(conn: Connection, ttl: Duration) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            ttl,
        })
    }

    pub fn in_memory(ttl: Duration) -> Result<Self, DomainError> {
        Self::open(":memory:", ttl)
    }

    /// `None` when the TTL reaches past the representable date range, in
    /// which case nothing is stale.
    fn cutoff(&self) -> Option<String> {
        Utc::now().checked_sub_signed(self.ttl).map(timestamp)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Cache(e.to_string()))
    }

    /// Inserts an entry with an explicit fetch time.
    pub fn put_at(&self, url: &str, body: &[u8], fetched_at: DateTime<Utc>) -> Result<(), DomainError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO page_cache (url, body, fetched_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET body = excluded.body, fetched_at = excluded.fetched_at",
            params![url, body, timestamp(fetched_at)],
        )
        .map_err(|e| DomainError::Cache(format!("Failed to cache {url}: {e}")))?;
        Ok(())
    }
}

// Fixed-width so stored timestamps compare correctly as text.
fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl PageCache for SqlitePageCache {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let conn = self.lock()?;
        let row: Option<(Vec<u8>, String)> = conn
            .query_row(
                "SELECT body, fetched_at FROM page_cache WHERE url = ?1",
                params![url],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| DomainError::Cache(e.to_string()))?;

        let Some((body, fetched_at)) = row else {
            return Ok(None);
        };
        let fresh = DateTime::parse_from_rfc3339(&fetched_at)
            .map(|dt| {
                dt.with_timezone(&Utc)
                    .checked_add_signed(self.ttl)
                    .map_or(true, |expires| expires > Utc::now())
            })
            .unwrap_or(false);
        if !fresh {
            debug!(url, "cached page is stale");
            return Ok(None);
        }
        Ok(Some(body))
    }

    fn put(&self, url: &str, body: &[u8]) -> Result<(), DomainError> {
        self.put_at(url, body, Utc::now())
    }

    fn purge_expired(&self) -> Result<usize, DomainError> {
        let Some(cutoff) = self.cutoff() else {
            return Ok(0);
        };
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM page_cache WHERE fetched_at <= ?1",
            params![cutoff],
        )
        .map_err(|e| DomainError::Cache(format!("Failed to purge cache: {e}")))
    }

    fn clear(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM page_cache", [])
            .map_err(|e| DomainError::Cache(format!("Failed to clear cache: {e}")))
    }
}
