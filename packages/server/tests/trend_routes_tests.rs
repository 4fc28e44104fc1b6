//! Health and trend endpoints through the full router.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use trend_agent::testing::{MockCompositionStage, MockResearchStage};
use trend_agent::{GroundingChunk, GroundingMetadata, GroundingSupport, TrendItem, TrendsReport};

const CLAIM: &str = "Milky nails are the most requested manicure this spring season";

fn research() -> MockResearchStage {
    MockResearchStage::new()
        .with_text(format!("{}.", CLAIM))
        .with_grounding(GroundingMetadata {
            chunks: vec![GroundingChunk::web(
                "https://vogue.com/milky-nails",
                Some("Vogue"),
                "vogue.com",
            )],
            supports: vec![GroundingSupport::new(CLAIM, vec![0], vec![0.8])],
        })
}

fn report() -> TrendsReport {
    let mut report = TrendsReport {
        report_summary: "Sheer, soft finishes everywhere.".into(),
        ..Default::default()
    };
    report
        .trends
        .makeup_trends
        .push(TrendItem::new("Milky Nails", "Sheer white polish."));
    report
}

#[tokio::test]
async fn test_health_reports_capabilities() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "image_editing_configured": true,
            "trend_agents": ["sephora", "estee-lauder"]
        })
    );
}

#[tokio::test]
async fn test_health_without_image_editor() {
    let harness =
        TestHarness::with(None, MockResearchStage::new(), MockCompositionStage::new());

    let (_, body) = harness.get("/health").await;
    assert_eq!(body["image_editing_configured"], false);
}

#[tokio::test]
async fn test_list_agents() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/trends/agents").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"agents": ["sephora", "estee-lauder"]}));
}

#[tokio::test]
async fn test_run_cited_agent() {
    let harness = TestHarness::with(
        None,
        research(),
        MockCompositionStage::new().with_report(report()),
    );

    let (status, body) = harness
        .post_json("/trends/estee-lauder", json!({"query": "spring nails"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["agent"], "estee-lauder");
    assert_eq!(
        body["findings_with_citations"],
        format!("{}  [Vogue](https://vogue.com/milky-nails).", CLAIM)
    );
    assert_eq!(body["sources"][0]["short_id"], "src-1");
    assert_eq!(body["report"]["trends"]["makeup_trends"][0]["name"], "Milky Nails");
    assert!(body.get("error").is_none());

    let calls = harness.research.calls();
    assert_eq!(calls[0].query, "spring nails");
    assert_eq!(harness.composition.inputs()[0], body["findings_with_citations"]);
}

#[tokio::test]
async fn test_run_without_body_uses_default_query() {
    let harness = TestHarness::new();

    let (status, _) = harness
        .send(axum::http::Method::POST, "/trends/sephora", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.research.calls()[0].query, "start");
}

#[tokio::test]
async fn test_malformed_body_is_rejected_without_running() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/trends/estee-lauder", json!({"query": 5}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body: "));
    assert!(harness.research.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_agent_is_404() {
    let harness = TestHarness::new();

    let (status, body) = harness.post_json("/trends/ulta", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unknown trend agent: ulta");
    assert!(harness.research.calls().is_empty());
}

#[tokio::test]
async fn test_pipeline_failure_is_502() {
    let harness = TestHarness::with(
        None,
        MockResearchStage::new().failing("search quota exhausted"),
        MockCompositionStage::new(),
    );

    let (status, body) = harness.post_json("/trends/sephora", json!({})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("search quota exhausted"));
}
