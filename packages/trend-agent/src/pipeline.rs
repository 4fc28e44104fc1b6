//! Two-stage trend pipeline.
//!
//! ```text
//! query → ResearchStage → SourceRegistry + stitch_citations → CompositionStage → TrendRun
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::citations::stitch_citations;
use crate::error::{Result, TrendAgentError};
use crate::profiles::{ComposeFrom, TrendProfile, DEFAULT_QUERY};
use crate::sources::{Source, SourceRegistry};
use crate::traits::{CompositionStage, ResearchStage};
use crate::types::TrendsReport;

/// Everything a single run produced.
#[derive(Debug, Clone, Serialize)]
pub struct TrendRun {
    pub agent: String,
    pub query: String,
    pub findings: String,
    pub findings_with_citations: String,
    pub sources: Vec<Source>,
    pub report: TrendsReport,
}

pub struct TrendPipeline {
    profile: TrendProfile,
    research: Arc<dyn ResearchStage>,
    composition: Arc<dyn CompositionStage>,
}

impl TrendPipeline {
    pub fn new(
        profile: TrendProfile,
        research: Arc<dyn ResearchStage>,
        composition: Arc<dyn CompositionStage>,
    ) -> Self {
        Self {
            profile,
            research,
            composition,
        }
    }

    pub fn profile(&self) -> &TrendProfile {
        &self.profile
    }

    /// Run research, stitch citations, then compose the report.
    ///
    /// A blank query runs the profile's default research brief.
    pub async fn run(&self, query: &str) -> Result<TrendRun> {
        let query = if query.trim().is_empty() {
            DEFAULT_QUERY
        } else {
            query.trim()
        };
        let agent = self.profile.name;

        info!(agent, query, "Starting trend research");
        let research = self.research.research(&self.profile, query).await?;

        let mut registry = SourceRegistry::new();
        for grounding in &research.grounding {
            registry.record(grounding);
        }

        let findings_with_citations = if research.text.trim().is_empty() {
            warn!(agent, "No research findings to cite");
            String::new()
        } else {
            stitch_citations(&research.text, &registry)
        };

        info!(
            agent,
            findings_len = research.text.len(),
            grounding_events = research.grounding.len(),
            sources = registry.len(),
            "Research complete, composing report"
        );

        let composer_input = match self.profile.compose_from {
            ComposeFrom::RawFindings => research.text.as_str(),
            ComposeFrom::CitedFindings => findings_with_citations.as_str(),
        };
        let report = self.composition.compose(&self.profile, composer_input).await?;

        info!(agent, trends = report.trend_count(), "Trend report composed");

        Ok(TrendRun {
            agent: agent.to_string(),
            query: query.to_string(),
            findings: research.text,
            findings_with_citations,
            sources: registry.into_sources(),
            report,
        })
    }
}

/// Pipelines addressable by profile name.
#[derive(Default)]
pub struct TrendAgents {
    pipelines: IndexMap<String, Arc<TrendPipeline>>,
}

impl TrendAgents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(mut self, pipeline: TrendPipeline) -> Self {
        self.pipelines
            .insert(pipeline.profile().name.to_string(), Arc::new(pipeline));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<TrendPipeline>> {
        self.pipelines.get(name).cloned()
    }

    /// Profile names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.pipelines.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Run the named pipeline.
    pub async fn run(&self, name: &str, query: &str) -> Result<TrendRun> {
        let pipeline = self
            .get(name)
            .ok_or_else(|| TrendAgentError::UnknownProfile(name.to_string()))?;
        pipeline.run(query).await
    }
}
