//! Composition stage trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::profiles::TrendProfile;
use crate::types::TrendsReport;

/// Maps research findings onto the structured report schema.
#[async_trait]
pub trait CompositionStage: Send + Sync {
    async fn compose(&self, profile: &TrendProfile, findings: &str) -> Result<TrendsReport>;
}
