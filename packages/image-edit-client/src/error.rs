//! Error types for the image-editing client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageEditError>;

#[derive(Debug, Error)]
pub enum ImageEditError {
    /// Request could not be built or sent, or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response JSON had no `data` entries
    #[error("Response has no data entries")]
    InvalidResponse,

    /// First `data` entry had no `b64_json`
    #[error("Response data has no b64_json image")]
    MissingImage,
}
