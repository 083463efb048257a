use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cache::{CacheStatus, QUILL_STATUS_HEADER};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::pipeline::{ScoreRequest, ScoreSource};
use crate::scoring::ScoreResult;
use crate::task::TaskCategory;

#[derive(Debug, Deserialize)]
pub struct ScoreRequestBody {
    #[serde(default, alias = "task_category", alias = "taskType")]
    pub task_type: Option<String>,
    #[serde(default, alias = "task_prompt")]
    pub prompt: Option<String>,
    pub text: String,
}

impl From<ScoreRequestBody> for ScoreRequest {
    fn from(body: ScoreRequestBody) -> Self {
        let category = body
            .task_type
            .as_deref()
            .map(TaskCategory::parse_lenient)
            .unwrap_or_default();
        ScoreRequest {
            category,
            prompt: body.prompt,
            text: body.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub request_id: String,
    pub scored_at: String,
    pub source: ScoreSource,
    pub cache: CacheStatus,
    pub result: ScoreResult,
}

/// Header value describing how a response was produced.
pub fn status_header_value(source: ScoreSource) -> &'static str {
    match source {
        ScoreSource::Cache => CacheStatus::Hit.as_header_value(),
        ScoreSource::Model => CacheStatus::Miss.as_header_value(),
        ScoreSource::Fallback => "FALLBACK",
    }
}

#[instrument(skip(state, body), fields(request_id = tracing::field::Empty))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let body: ScoreRequestBody = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", tracing::field::display(&request_id));

    let request = ScoreRequest::from(body);
    debug!(category = %request.category, "Processing score request");

    let outcome = state.pipeline.score(&request).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        QUILL_STATUS_HEADER,
        HeaderValue::from_static(status_header_value(outcome.source)),
    );

    let response = ScoreResponse {
        request_id,
        scored_at: chrono::Utc::now().to_rfc3339(),
        source: outcome.source,
        cache: outcome.cache_status,
        result: outcome.result,
    };

    Ok((headers, Json(response)).into_response())
}
