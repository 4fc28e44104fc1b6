use serde::{Deserialize, Serialize};

/// The trend a photo should be restyled with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInfo {
    pub name: String,
    pub description: String,
    pub techniques: Vec<String>,
    /// `makeup`, `skincare` or `hair`; anything else gets no category clauses.
    pub category: String,
    #[serde(default)]
    pub popularity: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub target_demographic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTransformRequest {
    pub trend_info: TrendInfo,
    /// Base64 image, optionally as a `data:` URL.
    pub image_data: String,
}

/// Always serialized with all three keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTransformResponse {
    pub success: bool,
    pub transformed_image: Option<String>,
    pub error: Option<String>,
}

impl ImageTransformResponse {
    pub fn transformed(image_b64: String) -> Self {
        Self {
            success: true,
            transformed_image: Some(image_b64),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transformed_image: None,
            error: Some(error.into()),
        }
    }
}
