// HTTP routes
pub mod health;
pub mod image_transform;
pub mod trends;

pub use health::*;
pub use image_transform::*;
pub use trends::*;
