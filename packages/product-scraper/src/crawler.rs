//! Sequential bestseller crawl.
//!
//! ```text
//! seed pages → product links (deduplicated) → product pages → records
//! ```
//!
//! Cancellation is checked between pages and interrupts the pacing sleeps,
//! so an interrupted crawl still hands back what it collected.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

use crate::config::{DelayRange, ScraperConfig};
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::fields::extract_product;
use crate::links::extract_product_links;
use crate::product::ProductRecord;
use crate::seeds::seed_urls;

/// Result of a crawl, complete or interrupted.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub products: Vec<ProductRecord>,
    /// Unique product URLs discovered on the seed pages.
    pub urls_found: usize,
    pub cancelled: bool,
}

pub struct Crawler {
    config: ScraperConfig,
    base: Url,
    fetcher: Arc<dyn PageFetcher>,
}

impl Crawler {
    pub fn new(config: ScraperConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let base = config.base()?;
        Ok(Self {
            config,
            base,
            fetcher,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Product links on one listing page. Fetch failures yield nothing.
    pub async fn product_links(&self, url: &str) -> Vec<String> {
        info!(url, "Fetching product links");
        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let links = extract_product_links(&html, &self.base);
                info!(url, count = links.len(), "Found product links");
                links
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to fetch listing page");
                Vec::new()
            }
        }
    }

    /// Visit every seed page and collect unique product URLs in
    /// first-seen order. Returns `None` if cancelled.
    pub async fn collect_product_urls(
        &self,
        cancel: &CancellationToken,
    ) -> Option<IndexSet<String>> {
        let mut urls = IndexSet::new();

        for seed in seed_urls(&self.config.base_url) {
            if cancel.is_cancelled() {
                return None;
            }
            urls.extend(self.product_links(&seed).await);

            if !pause(self.config.seed_delay, cancel).await {
                return None;
            }
        }

        info!(count = urls.len(), "Found unique product URLs");
        Some(urls)
    }

    /// Fetch and extract one product. Failures and nameless pages yield `None`.
    pub async fn scrape_product(&self, url: &str) -> Option<ProductRecord> {
        info!(url, "Scraping product");
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url, error = %e, "Failed to fetch product page");
                return None;
            }
        };

        match extract_product(&html, url) {
            Some(record) => {
                info!(url, name = %record.name, "Scraped product");
                Some(record)
            }
            None => {
                warn!(url, "No product name found");
                None
            }
        }
    }

    pub async fn run(&self, cancel: &CancellationToken) -> CrawlOutcome {
        info!(base_url = %self.config.base_url, max_products = self.config.max_products, "Starting product crawl");

        let mut outcome = CrawlOutcome::default();

        let Some(urls) = self.collect_product_urls(cancel).await else {
            info!("Crawl cancelled while collecting product URLs");
            outcome.cancelled = true;
            return outcome;
        };
        outcome.urls_found = urls.len();

        let targets: Vec<String> = urls.into_iter().take(self.config.max_products).collect();
        let total = targets.len();

        for (i, url) in targets.iter().enumerate() {
            if outcome.products.len() >= self.config.max_products {
                break;
            }
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            if let Some(record) = self.scrape_product(url).await {
                outcome.products.push(record);
            }

            let visited = i + 1;
            if self.config.progress_every > 0 && visited % self.config.progress_every == 0 {
                info!(visited, total, scraped = outcome.products.len(), "Progress");
            }

            if !pause(self.config.product_delay, cancel).await {
                outcome.cancelled = true;
                break;
            }
        }

        info!(
            products = outcome.products.len(),
            cancelled = outcome.cancelled,
            "Crawl finished"
        );
        outcome
    }
}

/// Sleep for a sampled delay. Returns `false` if cancelled first.
async fn pause(range: DelayRange, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if range.is_zero() {
        return true;
    }
    sleep_or_cancel(range.sample(), cancel).await
}

async fn sleep_or_cancel(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
