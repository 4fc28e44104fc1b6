//! Testing utilities including mock stage implementations.
//!
//! Useful for exercising pipelines and the HTTP layer without real LLM calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{Result, TrendAgentError};
use crate::profiles::TrendProfile;
use crate::traits::{CompositionStage, ResearchOutput, ResearchStage};
use crate::types::{GroundingMetadata, TrendsReport};

/// A research stage that returns a fixed answer.
#[derive(Default, Clone)]
pub struct MockResearchStage {
    output: Arc<RwLock<ResearchOutput>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<MockResearchCall>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockResearchCall {
    pub agent: String,
    pub query: String,
}

impl MockResearchStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.output.write().unwrap().text = text.into();
        self
    }

    pub fn with_grounding(self, grounding: GroundingMetadata) -> Self {
        self.output.write().unwrap().grounding.push(grounding);
        self
    }

    /// Fail every call with a research error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<MockResearchCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ResearchStage for MockResearchStage {
    async fn research(&self, profile: &TrendProfile, query: &str) -> Result<ResearchOutput> {
        self.calls.write().unwrap().push(MockResearchCall {
            agent: profile.name.to_string(),
            query: query.to_string(),
        });

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(TrendAgentError::Research(message));
        }

        Ok(self.output.read().unwrap().clone())
    }
}

/// A composition stage that returns a fixed report and records its input.
#[derive(Default, Clone)]
pub struct MockCompositionStage {
    report: Arc<RwLock<TrendsReport>>,
    inputs: Arc<RwLock<Vec<String>>>,
}

impl MockCompositionStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, report: TrendsReport) -> Self {
        *self.report.write().unwrap() = report;
        self
    }

    /// Findings text passed to each `compose` call.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.read().unwrap().clone()
    }
}

#[async_trait]
impl CompositionStage for MockCompositionStage {
    async fn compose(&self, _profile: &TrendProfile, findings: &str) -> Result<TrendsReport> {
        self.inputs.write().unwrap().push(findings.to_string());
        Ok(self.report.read().unwrap().clone())
    }
}
