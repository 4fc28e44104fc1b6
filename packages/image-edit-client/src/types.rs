use serde::Deserialize;

/// `images/edits` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageEditResponse {
    #[serde(default)]
    pub data: Option<Vec<ImageData>>,

    #[serde(default)]
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub b64_json: Option<String>,

    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl ImageEditResponse {
    /// Base64 payload of the first image.
    ///
    /// Distinguishes an empty `data` list from an entry without an image.
    pub fn first_image(&self) -> crate::Result<&str> {
        let first = self
            .data
            .as_ref()
            .and_then(|d| d.first())
            .ok_or(crate::ImageEditError::InvalidResponse)?;

        first
            .b64_json
            .as_deref()
            .filter(|b64| !b64.is_empty())
            .ok_or(crate::ImageEditError::MissingImage)
    }
}
