use serde::{Deserialize, Serialize};
use trend_agent::{Source, TrendRun, TrendsReport};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunTrendRequest {
    /// Research brief; blank runs the profile's default brief.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsResponse {
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRunResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TrendsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings_with_citations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrendRunResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            agent: None,
            report: None,
            findings_with_citations: None,
            sources: None,
            error: Some(error.into()),
        }
    }
}

impl From<TrendRun> for TrendRunResponse {
    fn from(run: TrendRun) -> Self {
        Self {
            success: true,
            agent: Some(run.agent),
            report: Some(run.report),
            findings_with_citations: Some(run.findings_with_citations),
            sources: Some(run.sources),
            error: None,
        }
    }
}
