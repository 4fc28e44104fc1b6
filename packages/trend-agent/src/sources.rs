//! Source registry built from grounding metadata.
//!
//! Every distinct web URL gets a short id (`src-1`, `src-2`, ...) in
//! first-seen order. Each grounding support adds a claim to the sources it
//! references. The registry only grows and lives for one pipeline run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{GroundingChunk, GroundingMetadata};

/// Confidence used when a support has fewer scores than chunk indices.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub short_id: String,
    pub title: String,
    pub url: String,
    pub domain: String,
    pub supported_claims: Vec<SupportedClaim>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedClaim {
    pub text_segment: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    url_to_short_id: IndexMap<String, String>,
    sources: IndexMap<String, Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one grounding event.
    pub fn record(&mut self, grounding: &GroundingMetadata) {
        // chunk index -> short id, web chunks only
        let mut chunk_ids: IndexMap<usize, String> = IndexMap::new();

        for (idx, chunk) in grounding.chunks.iter().enumerate() {
            let GroundingChunk::Web(web) = chunk else {
                continue;
            };

            let short_id = match self.url_to_short_id.get(&web.url) {
                Some(id) => id.clone(),
                None => {
                    let short_id = format!("src-{}", self.url_to_short_id.len() + 1);
                    let title = match web.title.as_deref() {
                        Some(title) if !title.is_empty() && title != web.domain => {
                            title.to_string()
                        }
                        _ => web.domain.clone(),
                    };

                    self.url_to_short_id
                        .insert(web.url.clone(), short_id.clone());
                    self.sources.insert(
                        short_id.clone(),
                        Source {
                            short_id: short_id.clone(),
                            title,
                            url: web.url.clone(),
                            domain: web.domain.clone(),
                            supported_claims: Vec::new(),
                        },
                    );
                    short_id
                }
            };

            chunk_ids.insert(idx, short_id);
        }

        for support in &grounding.supports {
            let text_segment = support.segment_text.clone().unwrap_or_default();

            for (i, chunk_idx) in support.chunk_indices.iter().enumerate() {
                let Some(short_id) = chunk_ids.get(chunk_idx) else {
                    continue;
                };
                let confidence = support
                    .confidence_scores
                    .get(i)
                    .copied()
                    .unwrap_or(DEFAULT_CONFIDENCE);

                if let Some(source) = self.sources.get_mut(short_id) {
                    source.supported_claims.push(SupportedClaim {
                        text_segment: text_segment.clone(),
                        confidence,
                    });
                }
            }
        }
    }

    pub fn get(&self, short_id: &str) -> Option<&Source> {
        self.sources.get(short_id)
    }

    pub fn short_id_for(&self, url: &str) -> Option<&str> {
        self.url_to_short_id.get(url).map(String::as_str)
    }

    /// Sources in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn into_sources(self) -> Vec<Source> {
        self.sources.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroundingSupport;

    fn event() -> GroundingMetadata {
        GroundingMetadata {
            chunks: vec![
                GroundingChunk::web("https://a.com/1", Some("Article One"), "a.com"),
                GroundingChunk::Other,
                GroundingChunk::web("https://b.com/2", Some("b.com"), "b.com"),
            ],
            supports: vec![GroundingSupport::new(
                "Glass skin remains the dominant skincare aesthetic.",
                vec![0, 1, 2],
                vec![0.9],
            )],
        }
    }

    #[test]
    fn test_ids_in_first_seen_order() {
        let mut registry = SourceRegistry::new();
        registry.record(&event());

        assert_eq!(registry.short_id_for("https://a.com/1"), Some("src-1"));
        assert_eq!(registry.short_id_for("https://b.com/2"), Some("src-2"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_title_falls_back_to_domain() {
        let mut registry = SourceRegistry::new();
        registry.record(&GroundingMetadata {
            chunks: vec![
                GroundingChunk::web("https://b.com/2", Some("b.com"), "b.com"),
                GroundingChunk::web("https://c.com/3", None, "c.com"),
            ],
            supports: vec![],
        });

        assert_eq!(registry.get("src-1").unwrap().title, "b.com");
        assert_eq!(registry.get("src-2").unwrap().title, "c.com");
    }

    #[test]
    fn test_missing_confidence_defaults_and_non_web_skipped() {
        let mut registry = SourceRegistry::new();
        registry.record(&event());

        let a = registry.get("src-1").unwrap();
        assert_eq!(a.supported_claims.len(), 1);
        assert_eq!(a.supported_claims[0].confidence, 0.9);

        // index 2 is the third score slot, which is missing
        let b = registry.get("src-2").unwrap();
        assert_eq!(b.supported_claims.len(), 1);
        assert_eq!(b.supported_claims[0].confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_registry_is_additive_across_events() {
        let mut registry = SourceRegistry::new();
        registry.record(&event());
        registry.record(&GroundingMetadata {
            chunks: vec![
                GroundingChunk::web("https://c.com/3", Some("Third"), "c.com"),
                GroundingChunk::web("https://a.com/1", Some("Article One"), "a.com"),
            ],
            supports: vec![GroundingSupport::new("Another claim", vec![1], vec![0.7])],
        });

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.short_id_for("https://c.com/3"), Some("src-3"));
        assert_eq!(registry.get("src-1").unwrap().supported_claims.len(), 2);

        let ids: Vec<&str> = registry.iter().map(|s| s.short_id.as_str()).collect();
        assert_eq!(ids, vec!["src-1", "src-2", "src-3"]);
    }
}
