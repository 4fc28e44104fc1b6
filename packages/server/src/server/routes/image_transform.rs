use axum::{extract::Extension, Json};

use crate::domains::image_transform::{transform_image, ImageTransformRequest, ImageTransformResponse};
use crate::server::app::AppState;

/// `POST /ai_transform_image`
///
/// Always answers 200; failures are reported in the body.
pub async fn ai_transform_image_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ImageTransformRequest>,
) -> Json<ImageTransformResponse> {
    let editor = state.server_deps.image_editor.as_deref();
    Json(transform_image(editor, &request).await)
}
