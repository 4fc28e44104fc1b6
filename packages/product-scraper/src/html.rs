//! Small helpers over the `scraper` crate.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Parse selectors, dropping (and logging) any that fail.
pub fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!(selector = %s, error = ?e, "Invalid CSS selector skipped");
                None
            }
        })
        .collect()
}

/// Text of an element: each descendant text node trimmed, concatenated
/// without separators.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Walk an ordered selector chain. For each selector only its first match
/// is considered; the first text `pick` accepts wins.
pub fn first_match<F>(document: &Html, chain: &[Selector], mut pick: F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    chain.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        pick(&element_text(&element))
    })
}
