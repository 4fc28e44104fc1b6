// Beauty Trends API - server core
//
// HTTP surface for the trend research pipelines and the image transform
// endpoint. External services sit behind kernel traits so routes can be
// driven with mocks in tests.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
