//! Pure Gemini REST API client
//!
//! A minimal client for `generateContent` with no domain-specific logic.
//! Works against both the public Gemini API (API key) and Vertex AI
//! (project + location + OAuth access token).
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content(
//!         GenerateContentRequest::new("gemini-2.5-pro")
//!             .system("You are a beauty trend researcher")
//!             .user("What is trending in skincare?")
//!             .with_google_search(),
//!     )
//!     .await?;
//!
//! println!("{}", response.text());
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Report {
//!     summary: String,
//! }
//!
//! let report: Report = client
//!     .extract::<Report>("gemini-2.5-pro", system_prompt, user_prompt)
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::fmt;

use reqwest::Client;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How requests are authenticated.
#[derive(Clone)]
pub enum Credentials {
    /// Public Gemini API with an API key (`x-goog-api-key`).
    ApiKey(String),

    /// Vertex AI with a bearer access token.
    Vertex {
        project_id: String,
        location: String,
        access_token: String,
    },
}

impl Credentials {
    fn default_base_url(&self) -> String {
        match self {
            Credentials::ApiKey(_) => GEMINI_API_BASE.to_string(),
            Credentials::Vertex {
                project_id,
                location,
                ..
            } => {
                let host = if location == "global" {
                    "aiplatform.googleapis.com".to_string()
                } else {
                    format!("{}-aiplatform.googleapis.com", location)
                };
                format!(
                    "https://{}/v1/projects/{}/locations/{}/publishers/google",
                    host, project_id, location
                )
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Credentials::Vertex {
                project_id,
                location,
                ..
            } => f
                .debug_struct("Vertex")
                .field("project_id", project_id)
                .field("location", location)
                .field("access_token", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Pure Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    credentials: Credentials,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the public Gemini API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::ApiKey(api_key.into()))
    }

    /// Create a client for Vertex AI.
    pub fn vertex(
        project_id: impl Into<String>,
        location: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self::with_credentials(Credentials::Vertex {
            project_id: project_id.into(),
            location: location.into(),
            access_token: access_token.into(),
        })
    }

    /// Create a client from explicit credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        let base_url = credentials.default_base_url();
        Self {
            http_client: Client::new(),
            credentials,
            base_url,
        }
    }

    /// Create from environment variables.
    ///
    /// `GOOGLE_GENAI_USE_VERTEXAI` (default true) selects Vertex AI, which reads
    /// `GOOGLE_CLOUD_PROJECT`, `GOOGLE_CLOUD_LOCATION` (default `global`) and
    /// `GOOGLE_ACCESS_TOKEN`. Otherwise `GOOGLE_API_KEY` is used.
    pub fn from_env() -> Result<Self> {
        let use_vertex = std::env::var("GOOGLE_GENAI_USE_VERTEXAI")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        if use_vertex {
            let project_id = std::env::var("GOOGLE_CLOUD_PROJECT")
                .map_err(|_| GeminiError::Config("GOOGLE_CLOUD_PROJECT not set".into()))?;
            let location =
                std::env::var("GOOGLE_CLOUD_LOCATION").unwrap_or_else(|_| "global".to_string());
            let access_token = std::env::var("GOOGLE_ACCESS_TOKEN")
                .map_err(|_| GeminiError::Config("GOOGLE_ACCESS_TOKEN not set".into()))?;
            Ok(Self::vertex(project_id, location, access_token))
        } else {
            let api_key = std::env::var("GOOGLE_API_KEY")
                .map_err(|_| GeminiError::Config("GOOGLE_API_KEY not set".into()))?;
            Ok(Self::new(api_key))
        }
    }

    /// Set a custom base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether this client talks to Vertex AI.
    pub fn is_vertex(&self) -> bool {
        matches!(self.credentials, Credentials::Vertex { .. })
    }

    /// Full `generateContent` URL for a model.
    pub fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Call `generateContent`.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();
        let url = self.endpoint_url(&request.model);

        let builder = self.http_client.post(&url).json(&request);
        let builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.header("x-goog-api-key", key),
            Credentials::Vertex { access_token, .. } => builder.bearer_auth(access_token),
        };

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, model = %request.model, "Gemini request failed");
            GeminiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            candidates = parsed.candidates.len(),
            total_tokens = parsed
                .usage_metadata
                .as_ref()
                .map(|u| u.total_token_count)
                .unwrap_or(0),
            duration_ms = start.elapsed().as_millis() as u64,
            "Gemini generateContent completed"
        );

        Ok(parsed)
    }

    /// Run a Google-Search-grounded prompt.
    ///
    /// Returns the full response so callers can read grounding metadata.
    pub async fn grounded_search(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
    ) -> Result<GenerateContentResponse> {
        let request = GenerateContentRequest::new(model)
            .system(system_prompt)
            .user(prompt)
            .with_google_search()
            .temperature(temperature);

        let response = self.generate_content(request).await?;

        if response.first_candidate().is_none() {
            return Err(GeminiError::EmptyResponse(
                "No candidates in grounded search response".into(),
            ));
        }

        Ok(response)
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a response schema from `T`, sends it as `responseSchema`,
    /// and deserializes the returned JSON text.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::gemini_schema();

        debug!(
            type_name = T::type_name(),
            schema = %serde_json::to_string_pretty(&schema).unwrap_or_default(),
            "Generated Gemini schema for extraction"
        );

        let request = GenerateContentRequest::new(model)
            .system(system_prompt)
            .user(user_prompt)
            .json_schema(schema);

        let response = self.generate_content(request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse(format!(
                "No structured output for {}",
                T::type_name()
            )));
        }

        serde_json::from_str(strip_code_blocks(&text)).map_err(|e| {
            GeminiError::Parse(format!("Failed to deserialize response: {}", e))
        })
    }
}

/// Truthy environment flag: `1`, `true`, `yes` or `on`, any case.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
