use crate::domain::error::DomainError;
use crate::domain::values::cost_model::CostModel;
use crate::domain::values::currency::Currency;
use crate::domain::values::market::{Market, MarketPair};
use crate::infrastructure::http::page_fetcher::FetcherConfig;
use std::str::FromStr;
use std::time::Duration;

/// Ten years.
pub const MAX_CACHE_TTL_SECS: u64 = 10 * 365 * 24 * 3600;

/// Runtime settings, read from `LANDEDCOST_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cache_db: String,
    pub cache_ttl: Duration,
    pub fetcher: FetcherConfig,
    pub markets: MarketPair,
    pub cost_model: CostModel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_db: "./landedcost_cache.db".into(),
            cache_ttl: Duration::from_secs(3600),
            fetcher: FetcherConfig::default(),
            markets: MarketPair::default(),
            cost_model: CostModel::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("LANDEDCOST_CACHE_DB") {
            config.cache_db = path;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "LANDEDCOST_CACHE_TTL_SECS")? {
            if secs > MAX_CACHE_TTL_SECS {
                return Err(DomainError::Config(format!(
                    "LANDEDCOST_CACHE_TTL_SECS must be at most {MAX_CACHE_TTL_SECS}, got {secs}"
                )));
            }
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "LANDEDCOST_MIN_DELAY_MS")? {
            config.fetcher.min_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "LANDEDCOST_MAX_DELAY_MS")? {
            config.fetcher.max_interval = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, "LANDEDCOST_RETRIES")? {
            config.fetcher.retries = retries;
        }
        if let Some(url) = lookup("LANDEDCOST_SOURCE_URL") {
            config.markets.source = Market::new(config.markets.source.name.clone(), url, Currency::Usd);
        }
        if let Some(url) = lookup("LANDEDCOST_DESTINATION_URL") {
            config.markets.destination =
                Market::new(config.markets.destination.name.clone(), url, Currency::Inr);
        }
        if let Some(rate) = parse_var::<f64>(&lookup, "LANDEDCOST_EXCHANGE_RATE")? {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(DomainError::Config(format!(
                    "LANDEDCOST_EXCHANGE_RATE must be positive, got {rate}"
                )));
            }
            config.cost_model = config.cost_model.with_exchange_rate(rate);
        }

        if config.fetcher.max_interval < config.fetcher.min_interval {
            return Err(DomainError::Config(
                "LANDEDCOST_MAX_DELAY_MS must not be below LANDEDCOST_MIN_DELAY_MS".into(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| DomainError::Config(format!("Invalid {key}={raw}: {e}")))
        })
        .transpose()
}
