//! CSV and summary writers.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{Result, ScraperError};
use crate::product::ProductRecord;

pub const DEFAULT_CSV_PATH: &str = "sephora_products.csv";
pub const DEFAULT_SUMMARY_PATH: &str = "sephora_products_summary.txt";
pub const PARTIAL_CSV_PATH: &str = "sephora_products_partial.csv";
pub const ERROR_CSV_PATH: &str = "sephora_products_error.csv";
pub const ERROR_SUMMARY_PATH: &str = "sephora_products_error_summary.txt";

const TOP_N: usize = 10;

/// Header row plus one row per record.
pub fn write_csv(products: &[ProductRecord], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;
    Ok(())
}

/// Values by descending count, ties in order of first appearance.
pub fn top_counts<'a>(values: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<(&'a str, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

pub fn render_summary(products: &[ProductRecord], timestamp: &str) -> String {
    let mut out = String::new();
    out.push_str("Sephora Products Scraping Summary\n");
    out.push_str("================================\n");
    let _ = writeln!(out, "Total products scraped: {}", products.len());
    let _ = writeln!(out, "Date: {}\n", timestamp);

    out.push_str("Top 10 Brands:\n");
    for (brand, count) in top_counts(products.iter().map(|p| p.brand.as_str()), TOP_N) {
        let _ = writeln!(out, "  {}: {} products", brand, count);
    }
    out.push('\n');

    out.push_str("Top 10 Categories:\n");
    for (category, count) in top_counts(products.iter().map(|p| p.category.as_str()), TOP_N) {
        let _ = writeln!(out, "  {}: {} products", category, count);
    }

    out
}

pub fn write_summary(products: &[ProductRecord], path: impl AsRef<Path>) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();
    fs::write(path.as_ref(), render_summary(products, &timestamp))?;
    Ok(())
}

/// Write the CSV and the summary. An empty list writes nothing.
///
/// Returns whether anything was written.
pub fn save(
    products: &[ProductRecord],
    csv_path: impl AsRef<Path>,
    summary_path: impl AsRef<Path>,
) -> Result<bool> {
    if products.is_empty() {
        warn!("No products to save");
        return Ok(false);
    }

    let csv_path = csv_path.as_ref();
    write_csv(products, csv_path)?;
    info!(count = products.len(), path = %csv_path.display(), "Saved products");

    let summary_path = summary_path.as_ref();
    write_summary(products, summary_path)?;
    info!(path = %summary_path.display(), "Saved summary");

    Ok(true)
}

/// What [`save_or_fallback`] wrote.
#[derive(Debug)]
pub enum Saved {
    /// No products, no files.
    Nothing,
    Primary,
    /// The primary paths failed with this error; the fallback paths hold the results.
    Fallback(ScraperError),
}

/// [`save`] to the primary paths, retrying on the fallback pair if that fails.
///
/// Errors only when the fallback write fails too.
pub fn save_or_fallback(
    products: &[ProductRecord],
    csv_path: impl AsRef<Path>,
    summary_path: impl AsRef<Path>,
    fallback_csv_path: impl AsRef<Path>,
    fallback_summary_path: impl AsRef<Path>,
) -> Result<Saved> {
    match save(products, csv_path, summary_path) {
        Ok(true) => Ok(Saved::Primary),
        Ok(false) => Ok(Saved::Nothing),
        Err(e) => {
            warn!(error = %e, "Failed to save results, writing fallback files");
            save(products, fallback_csv_path, fallback_summary_path)?;
            Ok(Saved::Fallback(e))
        }
    }
}
