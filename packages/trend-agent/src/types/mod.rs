//! Domain types for trend runs.

pub mod grounding;
pub mod report;

pub use grounding::{GroundingChunk, GroundingMetadata, GroundingSupport, WebSource};
pub use report::{TrendCategory, TrendItem, TrendsReport};
