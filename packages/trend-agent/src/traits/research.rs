//! Research stage trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::profiles::TrendProfile;
use crate::types::GroundingMetadata;

/// Free-text findings plus every grounding event that backed them.
#[derive(Debug, Clone, Default)]
pub struct ResearchOutput {
    pub text: String,
    pub grounding: Vec<GroundingMetadata>,
}

/// Search-grounded research.
///
/// Implementations call a model that can search the web and must return
/// the grounding metadata of each response so findings can be cited.
#[async_trait]
pub trait ResearchStage: Send + Sync {
    async fn research(&self, profile: &TrendProfile, query: &str) -> Result<ResearchOutput>;
}
