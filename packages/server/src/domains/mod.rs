// Business domains
pub mod image_transform;
pub mod trends;
