//! Pure hosted image-editing REST API client.
//!
//! Posts an image and an edit instruction as `multipart/form-data` to an
//! OpenAI-compatible `images/edits` deployment and returns the edited image
//! as base64.
//!
//! # Example
//!
//! ```rust,ignore
//! use image_edit_client::ImageEditClient;
//!
//! let client = ImageEditClient::new(endpoint_url, api_key);
//! let edited_b64 = client.edit_image(png_bytes, "Add a glossy red lip").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ImageEditError, Result};
pub use types::{ImageData, ImageEditResponse};

use std::fmt;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "flux.1-kontext-pro";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const IMAGE_FILE_NAME: &str = "image_to_edit.png";
const IMAGE_MIME: &str = "image/png";

#[derive(Clone)]
pub struct ImageEditClient {
    client: reqwest::Client,
    endpoint_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl fmt::Debug for ImageEditClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageEditClient")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ImageEditClient {
    pub fn new(endpoint_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_url: endpoint_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Edit an image according to `prompt`. Returns the base64 result.
    pub async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let image_bytes = image.len();

        let image_part = Part::bytes(image)
            .file_name(IMAGE_FILE_NAME)
            .mime_str(IMAGE_MIME)
            .map_err(|e| ImageEditError::Network(e.to_string()))?;

        let form = Form::new()
            .text("model", self.model.clone())
            .part("image", image_part)
            .text("prompt", prompt.to_string());

        let resp = self
            .client
            .post(&self.endpoint_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Image edit request failed");
                ImageEditError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "Image edit API error");
            return Err(ImageEditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ImageEditError::Network(e.to_string()))?;
        let parsed: ImageEditResponse =
            serde_json::from_str(&body).map_err(|e| ImageEditError::Parse(e.to_string()))?;

        let image_b64 = parsed.first_image()?.to_string();

        debug!(
            model = %self.model,
            input_bytes = image_bytes,
            output_b64_len = image_b64.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Image edit completed"
        );

        Ok(image_b64)
    }
}
