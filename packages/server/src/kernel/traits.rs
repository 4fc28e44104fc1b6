// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt building and error mapping live in the domains that use them.
//
// Naming convention: Base* for trait names

use async_trait::async_trait;
use image_edit_client::Result as ImageEditResult;

// =============================================================================
// Image Editing Trait (Infrastructure - hosted image model)
// =============================================================================

#[async_trait]
pub trait BaseImageEditor: Send + Sync {
    /// Edit `image` according to `prompt`, returning the result as base64.
    ///
    /// Errors keep the client's categories so callers can tell upstream
    /// rejections from malformed responses.
    async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> ImageEditResult<String>;
}
