//! `POST /ai_transform_image` through the full router.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use image_edit_client::ImageEditError;
use serde_json::{json, Value};
use server_core::kernel::MockImageEditor;
use trend_agent::testing::{MockCompositionStage, MockResearchStage};

fn body(category: &str, image_data: &str) -> Value {
    json!({
        "trend_info": {
            "name": "Strawberry Makeup",
            "description": "Flushed cheeks and freckles",
            "techniques": ["Cream blush high on cheeks", "Faux freckles"],
            "category": category,
            "popularity": "Viral"
        },
        "image_data": image_data
    })
}

fn harness_with(editor: Option<MockImageEditor>) -> TestHarness {
    TestHarness::with(editor, MockResearchStage::new(), MockCompositionStage::new())
}

#[tokio::test]
async fn test_transform_success() {
    let harness = harness_with(Some(MockImageEditor::new().with_image("bmV3LWltYWdl")));

    let (status, response) = harness
        .post_json("/ai_transform_image", body("makeup", "aGVsbG8="))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({"success": true, "transformed_image": "bmV3LWltYWdl", "error": null})
    );

    let calls = harness.image_editor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].image, b"hello");
    assert!(calls[0]
        .prompt
        .contains("Use these specific techniques: Cream blush high on cheeks, Faux freckles."));
}

#[tokio::test]
async fn test_missing_key_reports_configuration_error() {
    let harness = harness_with(None);

    let (status, response) = harness
        .post_json("/ai_transform_image", body("makeup", "aGVsbG8="))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Azure OpenAI API key not configured");
    assert_eq!(response["transformed_image"], Value::Null);
}

#[tokio::test]
async fn test_invalid_base64_skips_upstream() {
    let harness = TestHarness::new();

    let (status, response) = harness
        .post_json("/ai_transform_image", body("hair", "***not-an-image***"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], false);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid image data"));
    assert!(harness.image_editor.calls().is_empty());
}

#[tokio::test]
async fn test_upstream_rejection_is_relayed() {
    let harness = harness_with(Some(MockImageEditor::new().with_error(ImageEditError::Api {
        status: 429,
        message: "rate limited".into(),
    })));

    let (status, response) = harness
        .post_json("/ai_transform_image", body("skincare", "aGVsbG8="))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["error"], "Azure OpenAI API error: rate limited");
}

#[tokio::test]
async fn test_hair_prompt_reaches_editor() {
    let harness = TestHarness::new();

    harness
        .post_json("/ai_transform_image", body("hair", "aGVsbG8="))
        .await;

    let prompt = &harness.image_editor.calls()[0].prompt;
    assert!(prompt.contains("Focus ONLY on hairstyle"));
    assert!(!prompt.contains("Focus ONLY on makeup"));
}

#[tokio::test]
async fn test_malformed_request_is_rejected_by_extractor() {
    let harness = TestHarness::new();

    let (status, _) = harness
        .post_json("/ai_transform_image", json!({"image_data": "aGVsbG8="}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(harness.image_editor.calls().is_empty());
}
