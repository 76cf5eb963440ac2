use axum::Json;

use crate::interview::selector::{next_question, InterviewState, InterviewStep};

/// POST /api/v1/interview/next
pub async fn handle_next_question(Json(state): Json<InterviewState>) -> Json<InterviewStep> {
    Json(next_question(&state))
}
