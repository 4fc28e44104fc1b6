//! Crawl bestseller listings and write products to CSV.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use product_scraper::output::{self, Saved, ERROR_CSV_PATH, ERROR_SUMMARY_PATH, PARTIAL_CSV_PATH};
use product_scraper::{Crawler, HttpFetcher, ScraperConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scrape-products")]
#[command(about = "Scrape bestseller product records into CSV")]
struct Cli {
    /// CSV output path
    #[arg(long, default_value = output::DEFAULT_CSV_PATH)]
    output: String,

    /// Summary output path
    #[arg(long, default_value = output::DEFAULT_SUMMARY_PATH)]
    summary: String,

    #[arg(long, env = "SCRAPER_MAX_PRODUCTS", default_value_t = product_scraper::config::DEFAULT_MAX_PRODUCTS)]
    max_products: usize,

    #[arg(long, env = "SCRAPER_BASE_URL", default_value = product_scraper::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Skip the pacing delays between requests
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ScraperConfig::default()
        .with_base_url(cli.base_url)
        .with_max_products(cli.max_products);
    if cli.no_delay {
        config = config.without_delays();
    }

    let fetcher = Arc::new(HttpFetcher::new(&config).context("Failed to create HTTP client")?);
    let crawler = Crawler::new(config, fetcher).context("Invalid scraper configuration")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping crawl");
            on_signal.cancel();
        }
    });

    let outcome = crawler.run(&cancel).await;

    if outcome.cancelled {
        info!("Scraping interrupted by user");
        if output::save(&outcome.products, PARTIAL_CSV_PATH, &cli.summary)
            .context("Failed to save partial results")?
        {
            info!(path = PARTIAL_CSV_PATH, "Partial results saved");
        }
        return Ok(());
    }

    let saved = output::save_or_fallback(
        &outcome.products,
        &cli.output,
        &cli.summary,
        ERROR_CSV_PATH,
        ERROR_SUMMARY_PATH,
    )
    .context("Failed to save results to fallback files")?;

    match saved {
        Saved::Fallback(e) => {
            error!(error = %e, "Failed to save results");
            info!(
                output = ERROR_CSV_PATH,
                summary = ERROR_SUMMARY_PATH,
                "Partial results saved"
            );
            Err(e.into())
        }
        Saved::Primary | Saved::Nothing => {
            info!(
                products = outcome.products.len(),
                urls_found = outcome.urls_found,
                output = %cli.output,
                summary = %cli.summary,
                "Scraping completed"
            );
            if outcome.products.is_empty() {
                warn!("No products were scraped; the site may be blocking requests or its markup may have changed");
            }
            Ok(())
        }
    }
}
