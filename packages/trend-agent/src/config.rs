//! Configuration for the trend pipelines.

use std::env;

use gemini_client::{parse_flag, GeminiClient};

use crate::error::{Result, TrendAgentError};
use crate::security::SecretString;

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_LOCATION: &str = "global";
pub const DEFAULT_MAX_SEARCH_ITERATIONS: u32 = 5;

/// How the Gemini backend is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Public Gemini API with `GOOGLE_API_KEY`.
    ApiKey,
    /// Vertex AI with project, location and a supplied access token.
    VertexAi,
}

impl AuthMode {
    /// Mode selected by `GOOGLE_GENAI_USE_VERTEXAI`; unset means Vertex AI.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if !parse_flag(value) => AuthMode::ApiKey,
            _ => AuthMode::VertexAi,
        }
    }
}

/// Trend agent configuration.
///
/// Constructible directly (tests) or from the environment via [`TrendAgentConfig::from_env`].
#[derive(Debug, Clone)]
pub struct TrendAgentConfig {
    pub auth_mode: AuthMode,
    pub api_key: Option<SecretString>,
    pub project_id: Option<String>,
    pub location: String,
    pub access_token: Option<SecretString>,

    /// Model for the search-grounded research stage.
    pub research_model: String,

    /// Model for the structured composition stage.
    pub composer_model: String,

    /// Attempts allowed for a research answer that comes back empty.
    pub max_search_iterations: u32,
}

impl Default for TrendAgentConfig {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::VertexAi,
            api_key: None,
            project_id: None,
            location: DEFAULT_LOCATION.to_string(),
            access_token: None,
            research_model: DEFAULT_MODEL.to_string(),
            composer_model: DEFAULT_MODEL.to_string(),
            max_search_iterations: DEFAULT_MAX_SEARCH_ITERATIONS,
        }
    }
}

impl TrendAgentConfig {
    /// Config for the public Gemini API.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            auth_mode: AuthMode::ApiKey,
            api_key: Some(SecretString::new(key)),
            ..Default::default()
        }
    }

    /// Config for Vertex AI.
    pub fn vertex(
        project_id: impl Into<String>,
        location: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            auth_mode: AuthMode::VertexAi,
            project_id: Some(project_id.into()),
            location: location.into(),
            access_token: Some(SecretString::new(access_token)),
            ..Default::default()
        }
    }

    /// Load from environment variables and validate.
    ///
    /// `GOOGLE_GENAI_USE_VERTEXAI` defaults to true.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            auth_mode: AuthMode::from_flag(env::var("GOOGLE_GENAI_USE_VERTEXAI").ok().as_deref()),
            api_key: non_empty_var("GOOGLE_API_KEY").map(SecretString::new),
            project_id: non_empty_var("GOOGLE_CLOUD_PROJECT"),
            location: non_empty_var("GOOGLE_CLOUD_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            access_token: non_empty_var("GOOGLE_ACCESS_TOKEN").map(SecretString::new),
            research_model: non_empty_var("TREND_RESEARCH_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            composer_model: non_empty_var("TREND_COMPOSER_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_search_iterations: match non_empty_var("TREND_MAX_SEARCH_ITERATIONS") {
                Some(v) => v.parse().map_err(|_| {
                    TrendAgentError::Config(format!(
                        "TREND_MAX_SEARCH_ITERATIONS must be a positive integer, got {:?}",
                        v
                    ))
                })?,
                None => DEFAULT_MAX_SEARCH_ITERATIONS,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the credentials required by `auth_mode` are present.
    pub fn validate(&self) -> Result<()> {
        match self.auth_mode {
            AuthMode::ApiKey => {
                if self.api_key.as_ref().map_or(true, |k| k.is_blank()) {
                    return Err(TrendAgentError::Config(
                        "GOOGLE_API_KEY must be set when GOOGLE_GENAI_USE_VERTEXAI=false".into(),
                    ));
                }
            }
            AuthMode::VertexAi => {
                if self.project_id.as_deref().map_or(true, |p| p.trim().is_empty()) {
                    return Err(TrendAgentError::Config(
                        "GOOGLE_CLOUD_PROJECT must be set when using Vertex AI".into(),
                    ));
                }
                if self.access_token.as_ref().map_or(true, |t| t.is_blank()) {
                    return Err(TrendAgentError::Config(
                        "GOOGLE_ACCESS_TOKEN must be set when using Vertex AI".into(),
                    ));
                }
            }
        }

        if self.max_search_iterations == 0 {
            return Err(TrendAgentError::Config(
                "max_search_iterations must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Build a Gemini client for these credentials.
    pub fn gemini_client(&self) -> Result<GeminiClient> {
        self.validate()?;

        let client = match self.auth_mode {
            AuthMode::ApiKey => {
                let key = self.api_key.as_ref().map(|k| k.expose()).unwrap_or_default();
                GeminiClient::new(key)
            }
            AuthMode::VertexAi => GeminiClient::vertex(
                self.project_id.clone().unwrap_or_default(),
                self.location.clone(),
                self.access_token
                    .as_ref()
                    .map(|t| t.expose().to_string())
                    .unwrap_or_default(),
            ),
        };

        Ok(client)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_mode_requires_key() {
        let config = TrendAgentConfig {
            auth_mode: AuthMode::ApiKey,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TrendAgentError::Config(_))));

        assert!(TrendAgentConfig::api_key("AIza-test").validate().is_ok());
    }

    #[test]
    fn test_vertex_mode_requires_project() {
        let mut config = TrendAgentConfig::vertex("proj", "global", "token");
        assert!(config.validate().is_ok());

        config.project_id = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CLOUD_PROJECT"));
    }

    #[test]
    fn test_auth_mode_flag_matches_gemini_client() {
        assert_eq!(AuthMode::from_flag(None), AuthMode::VertexAi);
        for truthy in ["true", "1", "yes", "ON"] {
            assert_eq!(AuthMode::from_flag(Some(truthy)), AuthMode::VertexAi);
        }
        for falsy in ["false", "0", "no", ""] {
            assert_eq!(AuthMode::from_flag(Some(falsy)), AuthMode::ApiKey);
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = TrendAgentConfig::api_key("k");
        config.max_search_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = TrendAgentConfig::api_key("k");
        assert_eq!(config.research_model, "gemini-2.5-pro");
        assert_eq!(config.composer_model, "gemini-2.5-pro");
        assert_eq!(config.location, "global");
        assert_eq!(config.max_search_iterations, 5);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = TrendAgentConfig::api_key("AIza-very-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("AIza-very-secret"));
    }

    #[test]
    fn test_gemini_client_per_mode() {
        let client = TrendAgentConfig::api_key("k").gemini_client().unwrap();
        assert!(!client.is_vertex());

        let client = TrendAgentConfig::vertex("p", "us-central1", "t")
            .gemini_client()
            .unwrap();
        assert!(client.is_vertex());
    }
}
