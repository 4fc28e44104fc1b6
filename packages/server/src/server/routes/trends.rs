use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};
use trend_agent::TrendAgentError;

use crate::domains::trends::{AgentsResponse, RunTrendRequest, TrendRunResponse};
use crate::server::app::AppState;

/// `GET /trends/agents`
pub async fn list_agents_handler(Extension(state): Extension<AppState>) -> Json<AgentsResponse> {
    Json(AgentsResponse {
        agents: state.server_deps.trend_agents.names(),
    })
}

/// `POST /trends/:agent`
///
/// The body is optional; a request without a JSON body or with an empty
/// query runs the default brief. A JSON body that does not parse is rejected.
pub async fn run_trend_handler(
    Extension(state): Extension<AppState>,
    Path(agent): Path<String>,
    body: Result<Json<RunTrendRequest>, JsonRejection>,
) -> (StatusCode, Json<TrendRunResponse>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => RunTrendRequest::default(),
        Err(rejection) => {
            warn!(agent = %agent, error = %rejection.body_text(), "Rejected trend run body");
            return (
                rejection.status(),
                Json(TrendRunResponse::failed(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };
    let query = request.query.unwrap_or_default();

    info!(agent = %agent, query = %query, "Trend run requested");

    match state.server_deps.trend_agents.run(&agent, &query).await {
        Ok(run) => (StatusCode::OK, Json(run.into())),
        Err(TrendAgentError::UnknownProfile(name)) => (
            StatusCode::NOT_FOUND,
            Json(TrendRunResponse::failed(format!(
                "Unknown trend agent: {}",
                name
            ))),
        ),
        Err(e) => {
            error!(agent = %agent, error = %e, "Trend run failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(TrendRunResponse::failed(e.to_string())),
            )
        }
    }
}
