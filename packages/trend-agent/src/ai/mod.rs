//! LLM-backed stage implementations.

pub mod gemini;

pub use gemini::{gemini_agents, GeminiCompositionStage, GeminiResearchStage};
