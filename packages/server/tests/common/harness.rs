//! Test harness driving the router in-process.
//!
//! No sockets: requests go straight through `tower::ServiceExt::oneshot`
//! against an app wired with mock dependencies.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_core::kernel::{MockImageEditor, TestDependencies};
use server_core::server::build_app;
use tower::ServiceExt;
use trend_agent::testing::{MockCompositionStage, MockResearchStage};

pub struct TestHarness {
    pub app: Router,
    pub image_editor: MockImageEditor,
    pub research: MockResearchStage,
    pub composition: MockCompositionStage,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with(
            Some(MockImageEditor::new()),
            MockResearchStage::new(),
            MockCompositionStage::new(),
        )
    }

    /// Mocks are cloned into the app; the harness keeps handles for assertions.
    pub fn with(
        image_editor: Option<MockImageEditor>,
        research: MockResearchStage,
        composition: MockCompositionStage,
    ) -> Self {
        // Respect RUST_LOG; try_init avoids panicking when already set
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut deps = TestDependencies::new()
            .mock_research(research.clone())
            .mock_composition(composition.clone());
        deps = match &image_editor {
            Some(editor) => deps.mock_image_editor(editor.clone()),
            None => deps.without_image_editor(),
        };

        Self {
            app: build_app(deps.into_server_deps(), &[]),
            image_editor: image_editor.unwrap_or_default(),
            research,
            composition,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        // Extractor rejections answer in plain text
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }
}
