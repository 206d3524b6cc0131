use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS page_cache (
            url TEXT PRIMARY KEY,
            body BLOB NOT NULL,
            fetched_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_page_cache_fetched ON page_cache(fetched_at);
        ",
    )
    .map_err(|e| DomainError::Cache(format!("Migration failed: {e}")))
}
