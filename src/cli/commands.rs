use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "landedcost",
    about = "Cross-market listing scraper with landed-cost resale pricing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch both marketplace pages and price each identifier (ASIN)
    Price {
        /// One or more identifiers
        #[arg(required = true)]
        identifiers: Vec<String>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Price from hand-entered values without fetching
    Quote {
        /// Source-market price (USD)
        #[arg(long)]
        price: f64,
        /// Weight text, e.g. "2 pounds" or "500 grams"
        #[arg(long)]
        weight: Option<String>,
        /// Dimensions text, e.g. "10 x 8 x 2 inches"
        #[arg(long)]
        dimensions: Option<String>,
        /// Observed destination-market price (INR)
        #[arg(long)]
        observed: Option<f64>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Extract listing facts from a saved HTML page
    Extract {
        file: PathBuf,
    },
    /// Page cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Remove entries older than the cache TTL
    Purge,
    /// Remove every cached page
    Clear,
}
