pub mod models;
pub mod prompt;
pub mod service;

// Re-export commonly used types
pub use models::{ImageTransformRequest, ImageTransformResponse, TrendInfo};
pub use prompt::create_beauty_prompt;
pub use service::transform_image;
