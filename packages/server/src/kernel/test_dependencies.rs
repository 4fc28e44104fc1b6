// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use image_edit_client::{ImageEditError, Result as ImageEditResult};
use std::sync::{Arc, Mutex};
use trend_agent::testing::{MockCompositionStage, MockResearchStage};
use trend_agent::{profiles, TrendAgents, TrendPipeline};

use super::{BaseImageEditor, ServerDeps};

// =============================================================================
// Mock Image Editor
// =============================================================================

/// Arguments captured from an edit call
#[derive(Debug, Clone)]
pub struct ImageEditCall {
    pub image: Vec<u8>,
    pub prompt: String,
}

/// Queued outcomes are returned in order; once empty every call succeeds
/// with a fixed image.
#[derive(Clone)]
pub struct MockImageEditor {
    responses: Arc<Mutex<Vec<ImageEditResult<String>>>>,
    calls: Arc<Mutex<Vec<ImageEditCall>>>,
}

impl MockImageEditor {
    pub const DEFAULT_IMAGE: &'static str = "bW9jay1lZGl0ZWQ=";

    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(self, image_b64: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Ok(image_b64.to_string()));
        self
    }

    pub fn with_error(self, error: ImageEditError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Get all edit calls with their arguments
    pub fn calls(&self) -> Vec<ImageEditCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }
}

impl Default for MockImageEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseImageEditor for MockImageEditor {
    async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> ImageEditResult<String> {
        self.calls.lock().unwrap().push(ImageEditCall {
            image,
            prompt: prompt.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Self::DEFAULT_IMAGE.to_string())
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps backed by mocks
pub struct TestDependencies {
    pub image_editor: Option<MockImageEditor>,
    pub research: MockResearchStage,
    pub composition: MockCompositionStage,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            image_editor: Some(MockImageEditor::new()),
            research: MockResearchStage::new(),
            composition: MockCompositionStage::new(),
        }
    }

    pub fn mock_image_editor(mut self, editor: MockImageEditor) -> Self {
        self.image_editor = Some(editor);
        self
    }

    /// Simulate a server started without an image-editing key
    pub fn without_image_editor(mut self) -> Self {
        self.image_editor = None;
        self
    }

    pub fn mock_research(mut self, research: MockResearchStage) -> Self {
        self.research = research;
        self
    }

    pub fn mock_composition(mut self, composition: MockCompositionStage) -> Self {
        self.composition = composition;
        self
    }

    /// Both built-in profiles wired to the shared mock stages
    pub fn into_server_deps(self) -> ServerDeps {
        let research = Arc::new(self.research);
        let composition = Arc::new(self.composition);

        let agents = profiles::all()
            .into_iter()
            .fold(TrendAgents::new(), |agents, profile| {
                agents.with_pipeline(TrendPipeline::new(
                    profile,
                    research.clone(),
                    composition.clone(),
                ))
            });

        let image_editor = self
            .image_editor
            .map(|editor| Arc::new(editor) as Arc<dyn BaseImageEditor>);

        ServerDeps::new(image_editor, agents)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
