use clap::Parser;
use landedcost::cli::commands::{CacheAction, Cli, Commands, OutputFormat};
use landedcost::cli::output::{render_json, render_table};
use landedcost::config::AppConfig;
use landedcost::domain::entities::priced_listing::ListingRecord;
use landedcost::domain::ports::listing_store::ListingStore;
use landedcost::infrastructure::memory::listing_store::InMemoryListingStore;
use landedcost::LandedCost;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landedcost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(config: &AppConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Price {
            identifiers,
            format,
        } => {
            let lc = LandedCost::new(config)?;
            let store = InMemoryListingStore::new();
            let report = lc.price_batch(&identifiers, &store).await;
            tracing::info!(
                processed = report.processed,
                priced = report.priced,
                unpriced = report.unpriced,
                "batch finished"
            );
            for err in &report.errors {
                eprintln!("Warning: {err}");
            }

            let records: Vec<ListingRecord> = store.snapshot()?.iter().map(|l| l.record()).collect();
            print_records(&records, format)?;
        }
        Commands::Quote {
            price,
            weight,
            dimensions,
            observed,
            format,
        } => {
            let listing = landedcost::quote(config, price, weight, dimensions, observed)?;
            print_records(&[listing.record()], format)?;
        }
        Commands::Extract { file } => {
            let html = std::fs::read(&file)
                .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
            let facts = landedcost::extract(&html);
            println!("{}", serde_json::to_string_pretty(&facts)?);
        }
        Commands::Cache { action } => {
            let lc = LandedCost::new(config)?;
            match action {
                CacheAction::Purge => {
                    let n = lc.purge_cache()?;
                    println!("Purged {n} stale pages");
                }
                CacheAction::Clear => {
                    let n = lc.clear_cache()?;
                    println!("Cleared {n} cached pages");
                }
            }
        }
    }
    Ok(())
}

fn print_records(records: &[ListingRecord], format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Table => println!("{}", render_table(records)),
        OutputFormat::Json => println!("{}", render_json(records)?),
    }
    Ok(())
}
