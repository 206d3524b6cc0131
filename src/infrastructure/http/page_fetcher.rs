use crate::domain::error::DomainError;
use crate::domain::ports::page_cache::PageCache;
use crate::domain::ports::page_fetcher::PageFetcher;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Browser identity sent with a request. One is picked at random per request.
#[derive(Debug, Clone, Copy)]
pub struct HeaderProfile {
    pub user_agent: &'static str,
    pub accept_language: &'static str,
}

pub const HEADER_PROFILES: [HeaderProfile; 4] = [
    HeaderProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36",
        accept_language: "en-US,en;q=0.9",
    },
    HeaderProfile {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4) AppleWebKit/605.1.15 \
                     (KHTML, like Gecko) Version/16.4 Safari/605.1.15",
        accept_language: "en-US,en;q=0.9",
    },
    HeaderProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
        accept_language: "en-US,en;q=0.9",
    },
    HeaderProfile {
        user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
                     (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        accept_language: "en-US,en;q=0.9",
    },
];

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";
const REFERER_URL: &str = "https://www.google.com/";

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Lower bound of the spacing between consecutive network requests.
    pub min_interval: Duration,
    /// Upper bound; the actual spacing is drawn uniformly between the two.
    pub max_interval: Duration,
    /// Extra attempts after a network error, 429 or 5xx.
    pub retries: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            min_interval: Duration::from_millis(5000),
            max_interval: Duration::from_millis(6000),
            retries: 1,
        }
    }
}

impl FetcherConfig {
    /// No throttling or retries; for tests and local fixtures.
    pub fn immediate() -> Self {
        Self {
            min_interval: Duration::ZERO,
            max_interval: Duration::ZERO,
            retries: 0,
            ..Self::default()
        }
    }

    fn spacing(&self) -> Duration {
        if self.max_interval <= self.min_interval {
            return self.min_interval;
        }
        self.min_interval + (self.max_interval - self.min_interval).mul_f64(fastrand::f64())
    }
}

enum RequestError {
    Retryable(String),
    Fatal(String),
}

/// Listing page fetcher over `reqwest` with header rotation, request
/// spacing, retries and an optional page cache.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    cache: Option<Arc<dyn PageCache>>,
    config: FetcherConfig,
    last_request: Mutex<Option<Instant>>,
}

impl HttpPageFetcher {
    pub fn new(config: FetcherConfig, cache: Option<Arc<dyn PageCache>>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            cache,
            config,
            last_request: Mutex::new(None),
        })
    }

    /// Waits until the configured spacing since the previous request has
    /// passed. Holding the lock while sleeping keeps concurrent callers in line.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let spacing = self.config.spacing();
            let elapsed = prev.elapsed();
            if elapsed < spacing {
                tokio::time::sleep(spacing - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn request(&self, url: &str) -> Result<Vec<u8>, RequestError> {
        let profile = HEADER_PROFILES[fastrand::usize(..HEADER_PROFILES.len())];
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, profile.user_agent)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, profile.accept_language)
            .header(REFERER, REFERER_URL)
            .send()
            .await
            .map_err(|e| RequestError::Retryable(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let msg = format!("{url} returned {status}");
            return Err(
                if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    RequestError::Retryable(msg)
                } else {
                    RequestError::Fatal(msg)
                },
            );
        }

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| RequestError::Retryable(e.to_string()))
    }

    fn cached(&self, url: &str) -> Option<Vec<u8>> {
        let cache = self.cache.as_ref()?;
        match cache.get(url) {
            Ok(hit) => hit,
            Err(e) => {
                warn!(url, error = %e, "page cache read failed");
                None
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        if let Some(body) = self.cached(url) {
            debug!(url, "page cache hit");
            return Ok(body);
        }

        let mut attempt = 0;
        loop {
            self.throttle().await;
            match self.request(url).await {
                Ok(body) => {
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put(url, &body) {
                            warn!(url, error = %e, "page cache write failed");
                        }
                    }
                    return Ok(body);
                }
                Err(RequestError::Retryable(msg)) if attempt < self.config.retries => {
                    attempt += 1;
                    warn!(url, attempt, error = %msg, "retrying page fetch");
                }
                Err(RequestError::Retryable(msg)) | Err(RequestError::Fatal(msg)) => {
                    return Err(DomainError::Fetch(msg));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_within_bounds() {
        let config = FetcherConfig::default();
        for _ in 0..100 {
            let s = config.spacing();
            assert!(s >= config.min_interval && s <= config.max_interval);
        }
    }

    #[test]
    fn test_immediate_has_no_spacing() {
        assert_eq!(FetcherConfig::immediate().spacing(), Duration::ZERO);
    }

    #[test]
    fn test_fetcher_creation() {
        let fetcher = HttpPageFetcher::new(FetcherConfig::immediate(), None).unwrap();
        assert_eq!(fetcher.name(), "http");
    }
}
