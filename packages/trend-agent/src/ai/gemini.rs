//! Gemini implementation of the research and composition stages.
//!
//! # Example
//!
//! ```rust,ignore
//! use trend_agent::{ai::gemini_agents, TrendAgentConfig};
//!
//! let agents = gemini_agents(&TrendAgentConfig::from_env()?)?;
//! let run = agents.run("estee-lauder", "start").await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest};
use tracing::{debug, warn};

use crate::config::TrendAgentConfig;
use crate::error::{Result, TrendAgentError};
use crate::pipeline::{TrendAgents, TrendPipeline};
use crate::profiles::{self, TrendProfile};
use crate::traits::{CompositionStage, ResearchOutput, ResearchStage};
use crate::types::{
    GroundingChunk, GroundingMetadata, GroundingSupport, TrendsReport, WebSource,
};

/// Research with the Google Search tool enabled.
pub struct GeminiResearchStage {
    client: GeminiClient,
    model: String,
    max_search_iterations: u32,
}

impl GeminiResearchStage {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            max_search_iterations: crate::config::DEFAULT_MAX_SEARCH_ITERATIONS,
        }
    }

    /// Attempts allowed for an empty answer (at least one).
    pub fn with_max_search_iterations(mut self, max: u32) -> Self {
        self.max_search_iterations = max.max(1);
        self
    }
}

#[async_trait]
impl ResearchStage for GeminiResearchStage {
    async fn research(&self, profile: &TrendProfile, query: &str) -> Result<ResearchOutput> {
        let system = profile.research_system_prompt();
        let mut grounding = Vec::new();

        for attempt in 1..=self.max_search_iterations {
            let mut request = GenerateContentRequest::new(&self.model)
                .system(system.clone())
                .user(query)
                .with_google_search()
                .temperature(profile.research_temperature);
            if profile.include_thoughts {
                request = request.include_thoughts(true);
            }

            let response = self
                .client
                .generate_content(request)
                .await
                .map_err(|e| TrendAgentError::Research(e.to_string()))?;

            if let Some(metadata) = response.grounding_metadata() {
                grounding.push(to_grounding(metadata));
            }

            let text = response.text();
            if !text.trim().is_empty() {
                debug!(
                    agent = profile.name,
                    attempt,
                    grounding_events = grounding.len(),
                    "Research answer received"
                );
                return Ok(ResearchOutput { text, grounding });
            }

            warn!(
                agent = profile.name,
                attempt,
                max = self.max_search_iterations,
                "Empty research answer"
            );
        }

        Ok(ResearchOutput {
            text: String::new(),
            grounding,
        })
    }
}

/// Structured composition with a response schema generated from [`TrendsReport`].
pub struct GeminiCompositionStage {
    client: GeminiClient,
    model: String,
}

impl GeminiCompositionStage {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompositionStage for GeminiCompositionStage {
    async fn compose(&self, profile: &TrendProfile, findings: &str) -> Result<TrendsReport> {
        let user_prompt = format!("Research findings:\n\n{}", findings);

        self.client
            .extract::<TrendsReport>(&self.model, profile.composer_instruction, user_prompt)
            .await
            .map_err(|e| TrendAgentError::Composition(e.to_string()))
    }
}

/// Build one Gemini-backed pipeline per built-in profile.
pub fn gemini_agents(config: &TrendAgentConfig) -> Result<TrendAgents> {
    let client = config.gemini_client()?;

    let research: Arc<dyn ResearchStage> = Arc::new(
        GeminiResearchStage::new(client.clone(), &config.research_model)
            .with_max_search_iterations(config.max_search_iterations),
    );
    let composition: Arc<dyn CompositionStage> =
        Arc::new(GeminiCompositionStage::new(client, &config.composer_model));

    Ok(profiles::all()
        .into_iter()
        .fold(TrendAgents::new(), |agents, profile| {
            agents.with_pipeline(TrendPipeline::new(
                profile,
                research.clone(),
                composition.clone(),
            ))
        }))
}

/// Convert Gemini grounding metadata into the provider-neutral form.
///
/// API-key responses omit `domain` and put the domain in `title`, so the
/// domain falls back to the title, then to the URL host.
pub(crate) fn to_grounding(metadata: &gemini_client::GroundingMetadata) -> GroundingMetadata {
    let chunks = metadata
        .grounding_chunks
        .iter()
        .map(|chunk| {
            let Some(web) = chunk.web.as_ref() else {
                return GroundingChunk::Other;
            };
            let Some(url) = web.uri.clone() else {
                return GroundingChunk::Other;
            };

            let domain = web
                .domain
                .clone()
                .or_else(|| web.title.clone())
                .or_else(|| {
                    url::Url::parse(&url)
                        .ok()
                        .and_then(|u| u.host_str().map(str::to_string))
                })
                .unwrap_or_default();

            GroundingChunk::Web(WebSource {
                url,
                title: web.title.clone(),
                domain,
            })
        })
        .collect();

    let supports = metadata
        .grounding_supports
        .iter()
        .map(|support| GroundingSupport {
            segment_text: support.segment.as_ref().and_then(|s| s.text.clone()),
            chunk_indices: support.grounding_chunk_indices.clone(),
            confidence_scores: support.confidence_scores.clone(),
        })
        .collect();

    GroundingMetadata { chunks, supports }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Local HTTP server answering each request with the next queued body.
    struct StubGemini {
        base_url: String,
        requests: Arc<Mutex<Vec<Value>>>,
    }

    impl StubGemini {
        async fn start(responses: Vec<Value>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base_url = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = requests.clone();

            tokio::spawn(async move {
                let mut responses = responses.into_iter();
                while let Ok((mut socket, _)) = listener.accept().await {
                    let body = read_body(&mut socket).await;
                    recorded
                        .lock()
                        .unwrap()
                        .push(serde_json::from_slice(&body).unwrap_or(Value::Null));

                    let reply = responses
                        .next()
                        .unwrap_or_else(|| json!({"candidates": []}))
                        .to_string();
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        reply.len()
                    );
                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });

            Self { base_url, requests }
        }

        fn client(&self) -> GeminiClient {
            GeminiClient::new("AIza-test").with_base_url(self.base_url.clone())
        }

        fn requests(&self) -> Vec<Value> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn read_body(socket: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return Vec::new();
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            while buf.len() < start + length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return buf[start..].to_vec();
        }
    }

    fn answer(text: &str, grounding: Option<Value>) -> Value {
        let mut candidate = json!({"content": {"role": "model", "parts": [{"text": text}]}});
        if let Some(grounding) = grounding {
            candidate["groundingMetadata"] = grounding;
        }
        json!({"candidates": [candidate]})
    }

    fn report_json() -> String {
        json!({
            "report_summary": "Sheer, soft finishes everywhere.",
            "trends": {
                "makeup_trends": [
                    {"name": "Milky Nails", "description": "Sheer white polish.", "techniques": ["Sheer base coat"]}
                ]
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_research_retries_empty_answers_and_keeps_grounding() {
        let stub = StubGemini::start(vec![
            answer(
                "",
                Some(json!({
                    "groundingChunks": [
                        {"web": {"uri": "https://allure.com/a", "title": "Allure", "domain": "allure.com"}}
                    ]
                })),
            ),
            answer("   ", None),
            answer(
                "Glass skin is back.",
                Some(json!({
                    "groundingChunks": [
                        {"web": {"uri": "https://vogue.com/b", "title": "Vogue", "domain": "vogue.com"}}
                    ],
                    "groundingSupports": [
                        {"segment": {"text": "Glass skin is back"}, "groundingChunkIndices": [0], "confidenceScores": [0.9]}
                    ]
                })),
            ),
        ])
        .await;

        let stage = GeminiResearchStage::new(stub.client(), "gemini-test");
        let output = stage
            .research(&profiles::estee_lauder(), "spring skin")
            .await
            .unwrap();

        assert_eq!(output.text, "Glass skin is back.");
        assert_eq!(output.grounding.len(), 2);
        assert_eq!(
            output.grounding[0].chunks,
            vec![GroundingChunk::web("https://allure.com/a", Some("Allure"), "allure.com")]
        );
        assert_eq!(
            output.grounding[1].supports[0].segment_text.as_deref(),
            Some("Glass skin is back")
        );

        let requests = stub.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0]["tools"][0].get("googleSearch").is_some());
        assert_eq!(requests[0]["contents"][0]["parts"][0]["text"], "spring skin");
    }

    #[tokio::test]
    async fn test_research_gives_up_after_max_iterations() {
        let stub = StubGemini::start(vec![answer("", None), answer("", None), answer("late", None)]).await;

        let stage =
            GeminiResearchStage::new(stub.client(), "gemini-test").with_max_search_iterations(2);
        let output = stage.research(&profiles::sephora(), "start").await.unwrap();

        assert_eq!(output.text, "");
        assert!(output.grounding.is_empty());
        assert_eq!(stub.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_compose_parses_structured_report() {
        let stub = StubGemini::start(vec![answer(&report_json(), None)]).await;

        let stage = GeminiCompositionStage::new(stub.client(), "gemini-test");
        let report = stage
            .compose(&profiles::sephora(), "Milky nails are everywhere.")
            .await
            .unwrap();

        assert_eq!(report.report_summary, "Sheer, soft finishes everywhere.");
        let item = &report.trends.makeup_trends[0];
        assert_eq!(item.name, "Milky Nails");
        assert_eq!(item.popularity, "Rising");
        assert!(report.trends.hair_trends.is_empty());

        let request = &stub.requests()[0];
        assert!(request["generationConfig"]["responseSchema"].is_object());
        assert_eq!(
            request["contents"][0]["parts"][0]["text"],
            "Research findings:\n\nMilky nails are everywhere."
        );
    }

    #[tokio::test]
    async fn test_compose_accepts_code_fenced_report() {
        let fenced = format!("```json\n{}\n```", report_json());
        let stub = StubGemini::start(vec![answer(&fenced, None)]).await;

        let stage = GeminiCompositionStage::new(stub.client(), "gemini-test");
        let report = stage.compose(&profiles::sephora(), "findings").await.unwrap();

        assert_eq!(report.trends.makeup_trends[0].techniques, vec!["Sheer base coat"]);
    }

    #[tokio::test]
    async fn test_compose_empty_answer_is_composition_error() {
        let stub = StubGemini::start(vec![answer("", None)]).await;

        let stage = GeminiCompositionStage::new(stub.client(), "gemini-test");
        let result = stage.compose(&profiles::sephora(), "findings").await;

        assert!(matches!(result, Err(TrendAgentError::Composition(_))));
    }

    fn metadata(json: &str) -> gemini_client::GroundingMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_to_grounding_vertex_shape() {
        let converted = to_grounding(&metadata(
            r#"{
                "groundingChunks": [
                    {"web": {"uri": "https://vertexaisearch.cloud.google.com/r/1", "title": "Allure", "domain": "allure.com"}},
                    {"retrievedContext": {}}
                ],
                "groundingSupports": [
                    {"segment": {"startIndex": 0, "endIndex": 10, "text": "Glass skin"}, "groundingChunkIndices": [0, 1], "confidenceScores": [0.8, 0.6]}
                ]
            }"#,
        ));

        assert_eq!(
            converted.chunks[0],
            GroundingChunk::web(
                "https://vertexaisearch.cloud.google.com/r/1",
                Some("Allure"),
                "allure.com"
            )
        );
        assert_eq!(converted.chunks[1], GroundingChunk::Other);
        assert_eq!(converted.supports[0].segment_text.as_deref(), Some("Glass skin"));
        assert_eq!(converted.supports[0].chunk_indices, vec![0, 1]);
    }

    #[test]
    fn test_to_grounding_domain_fallbacks() {
        let converted = to_grounding(&metadata(
            r#"{
                "groundingChunks": [
                    {"web": {"uri": "https://example.com/a", "title": "vogue.com"}},
                    {"web": {"uri": "https://www.byrdie.com/b"}},
                    {"web": {"title": "no uri"}}
                ]
            }"#,
        ));

        let GroundingChunk::Web(first) = &converted.chunks[0] else {
            panic!("expected web chunk");
        };
        assert_eq!(first.domain, "vogue.com");

        let GroundingChunk::Web(second) = &converted.chunks[1] else {
            panic!("expected web chunk");
        };
        assert_eq!(second.domain, "www.byrdie.com");
        assert_eq!(second.title, None);

        assert_eq!(converted.chunks[2], GroundingChunk::Other);
    }

    #[test]
    fn test_gemini_agents_registers_profiles() {
        let agents = gemini_agents(&TrendAgentConfig::api_key("AIza-test")).unwrap();
        assert_eq!(agents.names(), vec!["sephora", "estee-lauder"]);
    }

    #[test]
    fn test_gemini_agents_requires_credentials() {
        let config = TrendAgentConfig::default();
        assert!(matches!(
            gemini_agents(&config),
            Err(TrendAgentError::Config(_))
        ));
    }
}
