use crate::domain::error::DomainError;

/// Stores fetched pages keyed by URL. Only fresh entries are returned by `get`.
pub trait PageCache: Send + Sync {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>, DomainError>;
    fn put(&self, url: &str, body: &[u8]) -> Result<(), DomainError>;
    /// Drops stale entries, returning how many were removed.
    fn purge_expired(&self) -> Result<usize, DomainError>;
    fn clear(&self) -> Result<usize, DomainError>;
}
