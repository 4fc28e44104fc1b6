//! Scraper configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Result, ScraperError};

pub const DEFAULT_BASE_URL: &str = "https://www.sephora.com";
pub const DEFAULT_MAX_PRODUCTS: usize = 1000;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A uniform random delay between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draw a delay. A reversed range collapses to `min`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let span = (self.max - self.min).as_secs_f64();
        self.min + Duration::from_secs_f64(span * rand::random::<f64>())
    }
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Site root; seeds and relative links resolve against it.
    pub base_url: String,

    /// Upper bound on product URLs visited and records kept.
    pub max_products: usize,

    /// Pause after each listing page.
    pub seed_delay: DelayRange,

    /// Pause after each product page.
    pub product_delay: DelayRange,

    pub request_timeout: Duration,
    pub max_redirects: usize,

    /// Log progress every N product URLs.
    pub progress_every: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_products: DEFAULT_MAX_PRODUCTS,
            seed_delay: DelayRange::new(Duration::from_secs(1), Duration::from_secs(3)),
            product_delay: DelayRange::new(Duration::from_millis(500), Duration::from_secs(2)),
            request_timeout: Duration::from_secs(10),
            max_redirects: 3,
            progress_every: 10,
        }
    }
}

impl ScraperConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_products(mut self, max_products: usize) -> Self {
        self.max_products = max_products;
        self
    }

    /// Disable both delays (tests, local mirrors).
    pub fn without_delays(mut self) -> Self {
        self.seed_delay = DelayRange::none();
        self.product_delay = DelayRange::none();
        self
    }

    /// Parsed base URL.
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| ScraperError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_range() {
        let range = DelayRange::new(Duration::from_millis(500), Duration::from_secs(2));
        for _ in 0..100 {
            let d = range.sample();
            assert!(d >= range.min && d <= range.max, "{:?} out of range", d);
        }
    }

    #[test]
    fn test_none_is_zero() {
        assert!(DelayRange::none().is_zero());
        assert_eq!(DelayRange::none().sample(), Duration::ZERO);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ScraperConfig::default().with_base_url("not a url");
        assert!(matches!(config.base(), Err(ScraperError::InvalidUrl { .. })));
    }
}
