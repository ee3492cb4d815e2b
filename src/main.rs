mod config;
mod error;
mod models;
mod pipeline;
mod scrapers;
mod store;

use anyhow::Context;
use config::ScraperConfig;
use error::ScrapeError;
use pipeline::Pipeline;
use scrapers::HttpFetcher;
use store::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Planning Scout - advertised development applications");

    let config = ScraperConfig::discover().context("Failed to load configuration")?;
    info!(
        "Listing {} ({} template) into {} table {}",
        config.listing_url,
        config.template,
        config.database_path.display(),
        config.table_name
    );

    let fetcher = HttpFetcher::new()?;
    let store = Store::open(&config.database_path, &config.table_name)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    let pipeline = Pipeline::new(fetcher, store, &config);

    match pipeline.run().await {
        Ok(_) => {
            let rows = pipeline.store().count()?;
            info!("Data has been successfully inserted into the database ({} rows).", rows);
            Ok(())
        }
        Err(e @ ScrapeError::ListFetch { .. }) => {
            error!("Failed to fetch page content: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Scrape run failed"),
    }
}
