//! Image transform flow: validate, build the instruction, call the editor,
//! and fold every outcome into an [`ImageTransformResponse`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image_edit_client::ImageEditError;
use tracing::{info, warn};

use super::models::{ImageTransformRequest, ImageTransformResponse};
use super::prompt::create_beauty_prompt;
use crate::kernel::BaseImageEditor;

pub const MISSING_KEY_ERROR: &str = "Azure OpenAI API key not configured";

/// Decode a base64 image, accepting an optional `data:<mime>;base64,` prefix
/// and line-wrapped input.
pub fn decode_image_data(raw: &str) -> Result<Vec<u8>, String> {
    let payload = match raw.trim().strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| "data URL has no payload".to_string())?,
        None => raw.trim(),
    };

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact).map_err(|e| e.to_string())?;

    if bytes.is_empty() {
        return Err("empty image payload".to_string());
    }
    Ok(bytes)
}

fn describe_edit_error(error: ImageEditError) -> String {
    match error {
        ImageEditError::Api { message, .. } => format!("Azure OpenAI API error: {}", message),
        ImageEditError::InvalidResponse => {
            "Invalid response format from Azure OpenAI API".to_string()
        }
        ImageEditError::MissingImage => "No transformed image received from API".to_string(),
        ImageEditError::Network(detail) | ImageEditError::Parse(detail) => {
            format!("Internal server error: {}", detail)
        }
    }
}

/// Run one transform. Never fails: errors become `success: false` responses.
pub async fn transform_image(
    editor: Option<&dyn BaseImageEditor>,
    request: &ImageTransformRequest,
) -> ImageTransformResponse {
    let Some(editor) = editor else {
        warn!("Image transform requested without an image-editing key");
        return ImageTransformResponse::failed(MISSING_KEY_ERROR);
    };

    let prompt = create_beauty_prompt(&request.trend_info);

    let image = match decode_image_data(&request.image_data) {
        Ok(bytes) => bytes,
        Err(detail) => {
            warn!(error = %detail, "Rejected image payload");
            return ImageTransformResponse::failed(format!("Invalid image data: {}", detail));
        }
    };

    info!(
        trend = %request.trend_info.name,
        category = %request.trend_info.category,
        image_bytes = image.len(),
        "Transforming image"
    );

    match editor.edit_image(image, &prompt).await {
        Ok(image_b64) => ImageTransformResponse::transformed(image_b64),
        Err(e) => {
            warn!(error = %e, "Image transform failed");
            ImageTransformResponse::failed(describe_edit_error(e))
        }
    }
}
