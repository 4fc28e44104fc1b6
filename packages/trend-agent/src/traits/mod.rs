//! Stage abstractions for the trend pipeline.

pub mod composition;
pub mod research;

pub use composition::CompositionStage;
pub use research::{ResearchOutput, ResearchStage};
