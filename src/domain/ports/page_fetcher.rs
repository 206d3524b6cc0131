use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Retrieves raw listing page bytes.
///
/// Any failure (network, timeout, non-success status) is an `Err`; callers in
/// the pricing pipeline treat it as "page unavailable" and carry on.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetcher name for logging
    fn name(&self) -> &str;

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}
