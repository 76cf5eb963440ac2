use axum::Json;
use serde::{Deserialize, Serialize};

use crate::evaluation::summarizer::{evaluate, render_report, EvaluationResult};
use crate::models::profile::{InterviewQa, Transcript};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub transcript: Transcript,
    pub interview_responses: Vec<InterviewQa>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub result: EvaluationResult,
    pub report: String,
}

/// POST /api/v1/evaluations
///
/// Returns both the structured result and the rendered staff report. Nothing is stored.
pub async fn handle_evaluate(Json(request): Json<EvaluationRequest>) -> Json<EvaluationResponse> {
    let result = evaluate(&request.transcript, &request.interview_responses);
    let report = render_report(&result);
    Json(EvaluationResponse { result, report })
}
