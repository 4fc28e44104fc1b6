//! Bestseller product crawler.
//!
//! Walks a retailer's bestseller listings, follows product links and turns
//! each product page into a flat [`ProductRecord`], written out as CSV plus a
//! plain-text summary.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use product_scraper::{Crawler, HttpFetcher, ScraperConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ScraperConfig::default().with_max_products(50);
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let crawler = Crawler::new(config, fetcher)?;
//!
//! let outcome = crawler.run(&CancellationToken::new()).await;
//! product_scraper::output::save(&outcome.products, "products.csv", "summary.txt")?;
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod fields;
pub mod html;
pub mod links;
pub mod output;
pub mod product;
pub mod seeds;
pub mod testing;

pub use config::{DelayRange, ScraperConfig};
pub use crawler::{CrawlOutcome, Crawler};
pub use error::{Result, ScraperError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use fields::extract_product;
pub use links::extract_product_links;
pub use product::ProductRecord;
pub use seeds::seed_urls;
