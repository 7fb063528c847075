use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::models::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResumeResponse {
    pub request_id: Uuid,
    pub parsed_at: DateTime<Utc>,
    pub record: ResumeRecord,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(req): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    if req.url.trim().is_empty() {
        return Err(AppError::Validation("Please enter a valid URL".to_string()));
    }

    let request_id = Uuid::new_v4();
    info!("[{request_id}] Parsing resume from {}", req.url.trim());

    let record = state.parser.parse_resume(&req.url).await?;

    info!("[{request_id}] Parsed resume");
    Ok(Json(ParseResumeResponse {
        request_id,
        parsed_at: Utc::now(),
        record,
    }))
}
