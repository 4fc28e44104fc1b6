pub mod models;

pub use models::{AgentsResponse, RunTrendRequest, TrendRunResponse};
