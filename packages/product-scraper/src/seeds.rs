//! Listing pages the crawl starts from.

pub const BESTSELLER_CATEGORIES: &[&str] = &[
    "makeup",
    "skincare",
    "hair",
    "fragrance",
    "tools-and-brushes",
    "bath-and-body",
    "mini-size",
    "gifts",
    "clean-beauty",
    "luxury",
];

const PAGE_SIZE_STEP: usize = 60;
const MAX_PAGE_SIZE: usize = 1020;

/// Bestseller pages in crawl order: the global list at growing page sizes,
/// then each category's list at its default size, 60 and 120.
pub fn seed_urls(base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');

    let mut urls = vec![format!("{}/bestsellers", base)];
    urls.extend(
        (PAGE_SIZE_STEP..=MAX_PAGE_SIZE)
            .step_by(PAGE_SIZE_STEP)
            .map(|size| format!("{}/bestsellers?pageSize={}", base, size)),
    );

    for category in BESTSELLER_CATEGORIES {
        let listing = format!("{}/shop/{}-bestsellers", base, category);
        urls.push(listing.clone());
        urls.push(format!("{}?pageSize=60", listing));
        urls.push(format!("{}?pageSize=120", listing));
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order_and_count() {
        let urls = seed_urls("https://www.sephora.com/");

        assert_eq!(urls.len(), 1 + 17 + 30);
        assert_eq!(urls[0], "https://www.sephora.com/bestsellers");
        assert_eq!(urls[1], "https://www.sephora.com/bestsellers?pageSize=60");
        assert_eq!(urls[17], "https://www.sephora.com/bestsellers?pageSize=1020");
        assert_eq!(urls[18], "https://www.sephora.com/shop/makeup-bestsellers");
        assert_eq!(urls[19], "https://www.sephora.com/shop/makeup-bestsellers?pageSize=60");
        assert_eq!(urls[20], "https://www.sephora.com/shop/makeup-bestsellers?pageSize=120");
        assert_eq!(urls[47], "https://www.sephora.com/shop/luxury-bestsellers?pageSize=120");
    }
}
