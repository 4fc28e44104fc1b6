//! Field extraction from product detail pages.
//!
//! Each field walks an ordered selector chain; the first selector whose
//! first element yields an acceptable value wins.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::html::{compile, first_match};
use crate::product::ProductRecord;

/// Descriptions at or under this many characters are treated as labels.
pub const MIN_DESCRIPTION_CHARS: usize = 20;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const DEFAULT_AVAILABILITY: &str = "Available";

lazy_static! {
    static ref PRICE: Regex = Regex::new(r"\$[\d,]+\.?\d*").unwrap();
    static ref RATING: Regex = Regex::new(r"(\d+\.?\d*)\s*out\s*of\s*5").unwrap();
    static ref REVIEW_COUNT: Regex = Regex::new(r"(\d+(?:,\d+)*)\s*reviews?").unwrap();

    static ref NAME: Vec<Selector> =
        compile(&["h1", ".css-1xvwxyi", r#"[data-at="product_name"]"#]);
    static ref BRAND: Vec<Selector> =
        compile(&[".css-1xvwxyi", r#"[data-at="brand_name"]"#, ".css-1qe8tjm"]);
    static ref PRICE_CHAIN: Vec<Selector> = compile(&[
        r#".css-1xvwxyi[data-at="price"]"#,
        r#"[data-at="price"]"#,
        r#".css-1qe8tjm[data-at="price"]"#,
        ".css-1xvwxyi",
        ".css-1qe8tjm",
    ]);
    static ref REVIEWS: Vec<Selector> = data_at_variants("number_of_reviews");
    static ref CATEGORY: Vec<Selector> = compile(&[
        r#".css-1xvwxyi[data-at="breadcrumb"]"#,
        r#"[data-at="breadcrumb"]"#,
        r#".css-1qe8tjm[data-at="breadcrumb"]"#,
    ]);
    static ref DESCRIPTION: Vec<Selector> = compile(&[
        r#"[data-at="product_description"]"#,
        r#".css-1xvwxyi[data-at="product_description"]"#,
        r#".css-1qe8tjm[data-at="product_description"]"#,
        ".css-1xvwxyi",
        ".css-1qe8tjm",
    ]);
    static ref INGREDIENTS: Vec<Selector> = data_at_variants("ingredients");
    static ref SIZE: Vec<Selector> = data_at_variants("size");
    static ref AVAILABILITY: Vec<Selector> = data_at_variants("availability");
}

/// `[data-at=X]`, then the two class-qualified variants.
fn data_at_variants(attr: &str) -> Vec<Selector> {
    let plain = format!(r#"[data-at="{}"]"#, attr);
    let first = format!(".css-1xvwxyi{}", plain);
    let second = format!(".css-1qe8tjm{}", plain);
    compile(&[plain.as_str(), first.as_str(), second.as_str()])
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Build a record from a product page. `None` when no name is found.
pub fn extract_product(html: &str, url: &str) -> Option<ProductRecord> {
    let document = Html::parse_document(html);

    let name = first_match(&document, &NAME, non_empty)?;

    let record = ProductRecord {
        url: url.to_string(),
        name,
        brand: first_match(&document, &BRAND, non_empty).unwrap_or_default(),
        price: extract_price(&document),
        rating: extract_rating(&document),
        review_count: extract_review_count(&document),
        category: first_match(&document, &CATEGORY, non_empty).unwrap_or_default(),
        description: extract_description(&document),
        ingredients: first_match(&document, &INGREDIENTS, non_empty).unwrap_or_default(),
        size: first_match(&document, &SIZE, non_empty).unwrap_or_default(),
        availability: first_match(&document, &AVAILABILITY, non_empty)
            .unwrap_or_else(|| DEFAULT_AVAILABILITY.to_string()),
    }
    .trimmed();

    (!record.name.is_empty()).then_some(record)
}

fn extract_price(document: &Html) -> String {
    first_match(document, &PRICE_CHAIN, parse_price).unwrap_or_default()
}

fn extract_rating(document: &Html) -> String {
    first_match(document, &REVIEWS, parse_rating).unwrap_or_default()
}

fn extract_review_count(document: &Html) -> String {
    first_match(document, &REVIEWS, parse_review_count).unwrap_or_default()
}

fn extract_description(document: &Html) -> String {
    first_match(document, &DESCRIPTION, |text| {
        (text.chars().count() > MIN_DESCRIPTION_CHARS)
            .then(|| text.chars().take(MAX_DESCRIPTION_CHARS).collect())
    })
    .unwrap_or_default()
}

/// First `$1,234.56`-style amount in the text.
pub fn parse_price(text: &str) -> Option<String> {
    PRICE.find(text).map(|m| m.as_str().to_string())
}

/// The `4.5` in `4.5 out of 5`.
pub fn parse_rating(text: &str) -> Option<String> {
    RATING.captures(text).map(|c| c[1].to_string())
}

/// The `1,234` in `1,234 reviews`.
pub fn parse_review_count(text: &str) -> Option<String> {
    REVIEW_COUNT.captures(text).map(|c| c[1].to_string())
}
