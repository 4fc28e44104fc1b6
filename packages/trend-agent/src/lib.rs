//! Search-grounded beauty trend research.
//!
//! A trend run is two explicit stages:
//!
//! 1. **Research**: a model with Google Search grounding writes free-text
//!    findings. Every grounding event is folded into a [`SourceRegistry`].
//! 2. **Composition**: a model maps the findings (raw or with stitched
//!    citations, per profile) onto the [`TrendsReport`] schema.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trend_agent::testing::{MockCompositionStage, MockResearchStage};
//! use trend_agent::{profiles, TrendPipeline};
//!
//! let pipeline = TrendPipeline::new(
//!     profiles::estee_lauder(),
//!     Arc::new(MockResearchStage::new().with_text("Glass skin is back.")),
//!     Arc::new(MockCompositionStage::new()),
//! );
//! let run = pipeline.run("start").await?;
//! println!("{}", run.findings_with_citations);
//! ```
//!
//! # Modules
//!
//! - [`citations`] - Matching grounded claims back into the report
//! - [`sources`] - Short-id source registry
//! - [`pipeline`] - The two-stage pipeline and the named agent set
//! - [`profiles`] - Brand-specific instructions
//! - [`ai`] - Gemini-backed stages
//! - [`testing`] - Mock stages

pub mod ai;
pub mod citations;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod profiles;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

pub use citations::{
    insert_citation_tags, normalize_punctuation_spacing, replace_citation_tags, stitch_citations,
};
pub use config::{AuthMode, TrendAgentConfig};
pub use error::{Result, TrendAgentError};
pub use pipeline::{TrendAgents, TrendPipeline, TrendRun};
pub use profiles::{ComposeFrom, TrendProfile};
pub use sources::{Source, SourceRegistry, SupportedClaim};
pub use traits::{CompositionStage, ResearchOutput, ResearchStage};
pub use types::{
    GroundingChunk, GroundingMetadata, GroundingSupport, TrendCategory, TrendItem, TrendsReport,
    WebSource,
};
