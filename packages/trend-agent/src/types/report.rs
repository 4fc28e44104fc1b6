//! The structured trends report produced by the composition stage.
//!
//! The response schema handed to the model is generated from these types,
//! so field docs double as instructions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A report of emerging beauty trends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendsReport {
    /// A high-level summary of the overall beauty landscape.
    pub report_summary: String,

    pub trends: TrendCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendCategory {
    /// A list of emerging makeup trends.
    #[serde(default)]
    pub makeup_trends: Vec<TrendItem>,

    /// A list of emerging skincare trends.
    #[serde(default)]
    pub skincare_trends: Vec<TrendItem>,

    /// A list of emerging hair trends.
    #[serde(default)]
    pub hair_trends: Vec<TrendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendItem {
    /// The name of the trend.
    pub name: String,

    /// A detailed description of the trend (2-3 sentences explaining what it is and why it's popular).
    pub description: String,

    /// A list of 3-5 specific, actionable techniques related to the trend. Each technique should be concise (2-4 words) and practical.
    #[serde(default)]
    pub techniques: Vec<String>,

    /// The popularity level of the trend (e.g., 'Rising', 'Viral', 'Emerging', 'Growing').
    #[serde(default = "default_popularity")]
    pub popularity: String,

    /// The difficulty level for consumers (e.g., 'Beginner', 'Intermediate', 'Advanced').
    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    /// A list of 2-3 key product types or ingredients associated with the trend.
    #[serde(default)]
    pub key_products: Vec<String>,

    /// The primary demographic interested in this trend (e.g., 'Gen Z', 'Millennials', 'All ages').
    #[serde(default = "default_target_demographic")]
    pub target_demographic: String,
}

fn default_popularity() -> String {
    "Rising".to_string()
}

fn default_difficulty() -> String {
    "Beginner".to_string()
}

fn default_target_demographic() -> String {
    "All ages".to_string()
}

impl TrendItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            techniques: Vec::new(),
            popularity: default_popularity(),
            difficulty: default_difficulty(),
            key_products: Vec::new(),
            target_demographic: default_target_demographic(),
        }
    }

    pub fn with_techniques(mut self, techniques: &[&str]) -> Self {
        self.techniques = techniques.iter().map(|t| t.to_string()).collect();
        self
    }
}

impl TrendsReport {
    /// Total number of trends across all categories.
    pub fn trend_count(&self) -> usize {
        self.trends.makeup_trends.len()
            + self.trends.skincare_trends.len()
            + self.trends.hair_trends.len()
    }
}
