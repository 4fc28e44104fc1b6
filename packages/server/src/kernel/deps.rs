//! Server dependencies (using traits for testability)
//!
//! Central container handed to every route. External services sit behind
//! trait objects so tests can swap in mocks.

use async_trait::async_trait;
use image_edit_client::{ImageEditClient, Result as ImageEditResult};
use std::sync::Arc;
use trend_agent::TrendAgents;

use crate::kernel::BaseImageEditor;

// =============================================================================
// ImageEditClient Adapter (implements BaseImageEditor trait)
// =============================================================================

/// Wrapper around ImageEditClient that implements BaseImageEditor trait
pub struct ImageEditAdapter(pub ImageEditClient);

impl ImageEditAdapter {
    pub fn new(client: ImageEditClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseImageEditor for ImageEditAdapter {
    async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> ImageEditResult<String> {
        self.0.edit_image(image, prompt).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to routes
#[derive(Clone)]
pub struct ServerDeps {
    /// `None` when no image-editing key is configured; transforms then
    /// answer with a configuration error instead of calling upstream.
    pub image_editor: Option<Arc<dyn BaseImageEditor>>,
    /// Trend pipelines addressable by profile name
    pub trend_agents: Arc<TrendAgents>,
}

impl ServerDeps {
    pub fn new(image_editor: Option<Arc<dyn BaseImageEditor>>, trend_agents: TrendAgents) -> Self {
        Self {
            image_editor,
            trend_agents: Arc::new(trend_agents),
        }
    }

    pub fn image_editing_configured(&self) -> bool {
        self.image_editor.is_some()
    }
}
