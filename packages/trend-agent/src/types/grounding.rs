//! Provider-neutral grounding metadata emitted by a research stage.

use serde::{Deserialize, Serialize};

/// Grounding attached to one model response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingMetadata {
    pub chunks: Vec<GroundingChunk>,
    pub supports: Vec<GroundingSupport>,
}

/// A retrieved chunk. Only web chunks carry a citable source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundingChunk {
    Web(WebSource),
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    pub url: String,
    pub title: Option<String>,
    pub domain: String,
}

/// A span of the response backed by one or more chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingSupport {
    pub segment_text: Option<String>,
    pub chunk_indices: Vec<usize>,
    pub confidence_scores: Vec<f32>,
}

impl GroundingChunk {
    pub fn web(url: impl Into<String>, title: Option<&str>, domain: impl Into<String>) -> Self {
        GroundingChunk::Web(WebSource {
            url: url.into(),
            title: title.map(str::to_string),
            domain: domain.into(),
        })
    }
}

impl GroundingSupport {
    pub fn new(
        segment_text: impl Into<String>,
        chunk_indices: Vec<usize>,
        confidence_scores: Vec<f32>,
    ) -> Self {
        Self {
            segment_text: Some(segment_text.into()),
            chunk_indices,
            confidence_scores,
        }
    }
}
