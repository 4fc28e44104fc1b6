//! Citation stitching.
//!
//! Matches the text segments that grounding sources claim to support back
//! into the research report, marks each match with a `<cite source="src-N"/>`
//! tag, then rewrites the tags into Markdown links.
//!
//! Positions are counted in characters, not bytes.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::sources::SourceRegistry;

/// Claims at or under this many characters are too generic to place.
pub const MIN_CLAIM_CHARS: usize = 30;

/// Characters that may precede a match for it to count as a word boundary.
const BOUNDARY_CHARS: &str = " \n\t.,;:!?-()[]{}";

lazy_static! {
    static ref MARKDOWN_EMPHASIS: Regex = Regex::new(r"\*+([^*]+)\*+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref CITE_TAG: Regex =
        Regex::new(r#"<cite\s+source\s*=\s*["']?\s*(src-\d+)\s*["']?\s*/>"#).unwrap();
    static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(r"\s+([.,;:])").unwrap();
}

/// Insert tags, replace them with links, then tidy punctuation spacing.
pub fn stitch_citations(report: &str, registry: &SourceRegistry) -> String {
    let tagged = insert_citation_tags(report, registry);
    let linked = replace_citation_tags(&tagged, registry);
    normalize_punctuation_spacing(&linked)
}

/// A placed citation: the matched span plus its trailing tag.
struct Placed {
    start: usize,
    end: usize,
}

/// Insert a `<cite source="src-N"/>` tag after each claim found in `report`.
///
/// Claims are tried longest first. Each claim is cited at most once, at its
/// first case-insensitive occurrence that starts on a word boundary and does
/// not overlap a citation already placed.
pub fn insert_citation_tags(report: &str, registry: &SourceRegistry) -> String {
    let mut claims: Vec<(Vec<char>, &str)> = registry
        .iter()
        .flat_map(|source| {
            source
                .supported_claims
                .iter()
                .filter_map(|claim| clean_claim(&claim.text_segment))
                .map(move |clean| {
                    let chars: Vec<char> = clean.chars().collect();
                    (chars, source.short_id.as_str())
                })
        })
        .collect();

    // Stable: equal lengths keep registry order
    claims.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut result: Vec<char> = report.chars().collect();
    let mut placed: Vec<Placed> = Vec::new();

    for (claim, short_id) in &claims {
        let needle: Vec<char> = claim.iter().map(|c| fold_case(*c)).collect();
        let haystack: Vec<char> = result.iter().map(|c| fold_case(*c)).collect();
        let span_len = claim.len();

        let mut search_from = 0;
        while let Some(pos) = find_from(&haystack, &needle, search_from) {
            let blocked = placed.iter().any(|p| {
                (p.start <= pos && pos < p.start + span_len)
                    || (p.end <= pos && pos < p.end + span_len)
                    || (pos < p.end && p.start < pos + span_len)
            });

            if blocked || !is_word_boundary(&result, pos) {
                search_from = pos + 1;
                continue;
            }

            let tag: Vec<char> = format!(" <cite source=\"{}\"/>", short_id)
                .chars()
                .collect();
            let insert_at = pos + span_len;
            let tag_len = tag.len();
            let tail = result.split_off(insert_at);
            result.extend(tag);
            result.extend(tail);

            for p in placed.iter_mut().filter(|p| p.start >= insert_at) {
                p.start += tag_len;
                p.end += tag_len;
            }
            placed.push(Placed {
                start: pos,
                end: insert_at + tag_len,
            });

            debug!(source = %short_id, position = pos, "Placed citation");
            break;
        }
    }

    result.into_iter().collect()
}

/// Replace citation tags with ` [title](url)` links.
///
/// Tags naming an unknown source are removed.
pub fn replace_citation_tags(text: &str, registry: &SourceRegistry) -> String {
    CITE_TAG
        .replace_all(text, |caps: &Captures| {
            let short_id = &caps[1];
            match registry.get(short_id) {
                Some(source) => {
                    let display = if !source.title.is_empty() {
                        source.title.as_str()
                    } else if !source.domain.is_empty() {
                        source.domain.as_str()
                    } else {
                        short_id
                    };
                    format!(" [{}]({})", display, source.url)
                }
                None => {
                    warn!(tag = %&caps[0], "Invalid citation tag found and removed");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Remove whitespace before `.`, `,`, `;` and `:`.
pub fn normalize_punctuation_spacing(text: &str) -> String {
    SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1").into_owned()
}

/// Trim, strip Markdown emphasis, collapse whitespace. `None` if too short.
fn clean_claim(segment: &str) -> Option<String> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_emphasis = MARKDOWN_EMPHASIS.replace_all(trimmed, "$1");
    let clean = WHITESPACE_RUN.replace_all(&without_emphasis, " ").into_owned();

    (clean.chars().count() > MIN_CLAIM_CHARS).then_some(clean)
}

/// Single-character lowercase mapping so positions stay aligned.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn is_word_boundary(text: &[char], pos: usize) -> bool {
    pos == 0 || BOUNDARY_CHARS.contains(text[pos - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroundingChunk, GroundingMetadata, GroundingSupport};

    const GLASS_SKIN: &str = "Glass skin remains the dominant skincare aesthetic";

    fn registry_with(claims: &[(&str, usize)]) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        registry.record(&GroundingMetadata {
            chunks: vec![
                GroundingChunk::web("https://a.com/glass", Some("Allure"), "a.com"),
                GroundingChunk::web("https://b.com/lips", Some("b.com"), "b.com"),
            ],
            supports: claims
                .iter()
                .map(|(text, idx)| GroundingSupport::new(*text, vec![*idx], vec![0.9]))
                .collect(),
        });
        registry
    }

    fn count_tags(text: &str) -> usize {
        text.matches("<cite source=").count()
    }

    #[test]
    fn test_report_without_matches_only_normalizes_punctuation() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = "Nothing here matches , at all ; truly .";

        assert_eq!(
            stitch_citations(report, &registry),
            normalize_punctuation_spacing(report)
        );
        assert_eq!(
            stitch_citations(report, &registry),
            "Nothing here matches, at all; truly."
        );
    }

    #[test]
    fn test_inserts_tag_after_claim() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = format!("Experts agree: {}. More text.", GLASS_SKIN);

        let tagged = insert_citation_tags(&report, &registry);
        assert_eq!(
            tagged,
            format!("Experts agree: {} <cite source=\"src-1\"/>. More text.", GLASS_SKIN)
        );
    }

    #[test]
    fn test_stitch_produces_markdown_link() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = format!("Experts agree: {}. More text.", GLASS_SKIN);

        let stitched = stitch_citations(&report, &registry);
        assert!(stitched.contains("aesthetic  [Allure](https://a.com/glass). More text."));
        assert!(!stitched.contains("<cite"));
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_report_text() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = "GLASS SKIN REMAINS THE DOMINANT SKINCARE AESTHETIC today";

        let tagged = insert_citation_tags(report, &registry);
        assert!(tagged.starts_with(
            "GLASS SKIN REMAINS THE DOMINANT SKINCARE AESTHETIC <cite source=\"src-1\"/>"
        ));
    }

    #[test]
    fn test_emphasis_and_whitespace_in_claim_are_cleaned() {
        let registry = registry_with(&[(
            "  **Glass skin**   remains the\n dominant *skincare* aesthetic ",
            0,
        )]);
        let report = format!("{} for now", GLASS_SKIN);

        assert_eq!(count_tags(&insert_citation_tags(&report, &registry)), 1);
    }

    #[test]
    fn test_short_claims_are_ignored() {
        let registry = registry_with(&[("Glass skin is in", 0)]);
        let report = "Glass skin is in this season.";

        assert_eq!(insert_citation_tags(report, &registry), report);
    }

    #[test]
    fn test_requires_word_boundary() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = format!("x{} and then (", GLASS_SKIN);
        assert_eq!(count_tags(&insert_citation_tags(&report, &registry)), 0);

        let report = format!("x{} and again ({})", GLASS_SKIN, GLASS_SKIN);
        let tagged = insert_citation_tags(&report, &registry);
        assert_eq!(count_tags(&tagged), 1);
        assert!(tagged.contains(&format!("({} <cite", GLASS_SKIN)));
    }

    #[test]
    fn test_each_claim_cited_once() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = format!("{}. Again: {}.", GLASS_SKIN, GLASS_SKIN);

        let tagged = insert_citation_tags(&report, &registry);
        assert_eq!(count_tags(&tagged), 1);
        assert!(tagged.starts_with(&format!("{} <cite", GLASS_SKIN)));
    }

    #[test]
    fn test_nested_claims_never_overlap() {
        let longer = "Across social platforms glass skin remains the dominant skincare aesthetic";
        let shorter = "the dominant skincare aesthetic";
        let registry = registry_with(&[(shorter, 1), (longer, 0)]);
        let report = format!("{}. Nothing else.", longer);

        let tagged = insert_citation_tags(&report, &registry);
        assert_eq!(count_tags(&tagged), 1);
        assert!(tagged.contains("<cite source=\"src-1\"/>"));
    }

    #[test]
    fn test_earlier_insertion_shifts_placed_spans() {
        let first = "Peptide serums are replacing retinol for sensitive skin";
        let second = "Glossy lip oils are selling out across every retailer";
        let registry = registry_with(&[(first, 0), (second, 1)]);

        // `first` is longer, so it is placed first even though it comes later
        let report = format!("{} today. Meanwhile {}.", second, first);
        let tagged = insert_citation_tags(&report, &registry);

        assert_eq!(count_tags(&tagged), 2);
        assert!(tagged.contains(&format!("{} <cite source=\"src-2\"/>", second)));
        assert!(tagged.contains(&format!("{} <cite source=\"src-1\"/>", first)));
    }

    #[test]
    fn test_unknown_tag_removed() {
        let registry = registry_with(&[]);
        let text = "Claim <cite source=\"src-9\"/>.";

        assert_eq!(replace_citation_tags(text, &registry), "Claim .");
        assert_eq!(stitch_citations(text, &registry), "Claim.");
    }

    #[test]
    fn test_tag_variants_are_recognized() {
        let registry = registry_with(&[(GLASS_SKIN, 0), (GLASS_SKIN, 1)]);
        let text = "A <cite source='src-1' /> B <cite  source = src-2/>";

        assert_eq!(
            replace_citation_tags(text, &registry),
            "A  [Allure](https://a.com/glass) B  [b.com](https://b.com/lips)"
        );
    }

    #[test]
    fn test_multibyte_text_positions() {
        let registry = registry_with(&[(GLASS_SKIN, 0)]);
        let report = format!("Tendance beauté · {} ✨", GLASS_SKIN);

        let tagged = insert_citation_tags(&report, &registry);
        assert_eq!(
            tagged,
            format!("Tendance beauté · {} <cite source=\"src-1\"/> ✨", GLASS_SKIN)
        );
    }
}
