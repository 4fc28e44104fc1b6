use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use trend_agent::TrendAgentConfig;

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_IMAGE_EDIT_URL: &str = "https://ashle-m8gjmknf-eastus2.services.ai.azure.com/openai/deployments/FLUX.1-Kontext-pro/images/edits?api-version=2025-04-01-preview";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Bearer key for the image-editing deployment. Image transforms answer
    /// with an error while this is unset.
    pub azure_openai_api_key: Option<String>,
    pub image_edit_url: String,
    pub image_edit_model: String,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub trend_agent: TrendAgentConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .context("PORT must be a valid number")?,
            azure_openai_api_key: env::var("AZURE_OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            image_edit_url: env::var("AZURE_IMAGE_EDIT_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_EDIT_URL.to_string()),
            image_edit_model: env::var("AZURE_IMAGE_EDIT_MODEL")
                .unwrap_or_else(|_| image_edit_client::DEFAULT_MODEL.to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            trend_agent: TrendAgentConfig::from_env()
                .context("Trend agent credentials are not configured")?,
        })
    }
}

/// Comma-separated origins, blanks dropped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
