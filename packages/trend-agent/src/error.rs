//! Typed errors for the trend agent.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendAgentError>;

/// Errors that can occur while running a trend pipeline.
#[derive(Debug, Error)]
pub enum TrendAgentError {
    /// Missing or inconsistent configuration
    #[error("config error: {0}")]
    Config(String),

    /// No profile registered under this name
    #[error("unknown trend agent: {0}")]
    UnknownProfile(String),

    /// Research stage failed
    #[error("research failed: {0}")]
    Research(String),

    /// Composition stage failed
    #[error("composition failed: {0}")]
    Composition(String),

    /// Upstream LLM error
    #[error("LLM error: {0}")]
    Llm(#[from] gemini_client::GeminiError),
}
