//! Product link extraction from listing pages.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::html::compile;

/// Path segment that marks a product detail page.
pub const PRODUCT_PATH_MARKER: &str = "/product/";

/// JSON keys whose string values may hold product URLs.
const JSON_URL_KEYS: &[&str] = &["url", "href", "link"];

lazy_static! {
    static ref LINK_SELECTORS: Vec<Selector> = compile(&[
        r#"a[data-at="product_link"]"#,
        r#"a[href*="/product/"]"#,
        ".css-1qe8tjm a",
        ".css-1xvwxyi a",
        r#"[data-comp="ProductCard "] a"#,
        r#".css-1qe8tjm a[href*="/product/"]"#,
        r#"a[data-at="product_name"]"#,
    ]);
    static ref JSON_SCRIPT: Vec<Selector> = compile(&[r#"script[type="application/json"]"#]);
}

/// Absolute product URLs found on a listing page, first-seen order, no duplicates.
pub fn extract_product_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = IndexSet::new();

    for selector in LINK_SELECTORS.iter() {
        for element in document.select(selector) {
            if let Some(href) = element.value().attr("href") {
                push_product_url(href, base, &mut links);
            }
        }
    }

    for selector in JSON_SCRIPT.iter() {
        for script in document.select(selector) {
            let body: String = script.text().collect();
            if body.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(&body) {
                Ok(data @ Value::Object(_)) => collect_json_urls(&data, base, &mut links),
                Ok(_) => {}
                Err(e) => debug!(error = %e, "Skipping unparseable JSON script"),
            }
        }
    }

    links.into_iter().collect()
}

/// Recursively collect product URLs under `url`/`href`/`link` keys.
fn collect_json_urls(value: &Value, base: &Url, links: &mut IndexSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::String(s) if JSON_URL_KEYS.contains(&key.as_str()) => {
                        push_product_url(s, base, links);
                    }
                    Value::Object(_) | Value::Array(_) => collect_json_urls(child, base, links),
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_urls(item, base, links);
            }
        }
        _ => {}
    }
}

fn push_product_url(href: &str, base: &Url, links: &mut IndexSet<String>) {
    if !href.contains(PRODUCT_PATH_MARKER) {
        return;
    }
    if let Ok(absolute) = base.join(href) {
        links.insert(absolute.to_string());
    }
}
