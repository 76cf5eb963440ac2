//! Axum route handlers for the agent-facing tool API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tools::{invoke, manifest, ToolKind, ToolManifestEntry};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Program search sends `{"query": "..."}`; the other tools send `{"payload": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    #[serde(default, alias = "query")]
    pub payload: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse {
    pub call_id: Uuid,
    pub tool: String,
    /// Serialized tool result, passed back to the agent verbatim.
    pub output: String,
    pub completed_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tools
pub async fn handle_list_tools() -> Json<Vec<ToolManifestEntry>> {
    Json(manifest())
}

/// POST /api/v1/tools/:id
///
/// Runs one tool call. Malformed payloads still produce a result; only an
/// unknown tool id is an error.
pub async fn handle_invoke_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<ToolResponse>, AppError> {
    let kind = ToolKind::from_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("Tool '{id}' not found")))?;

    let output = invoke(kind, &request.payload, &state.catalog, state.scorer.as_ref());

    Ok(Json(ToolResponse {
        call_id: Uuid::new_v4(),
        tool: kind.id().to_string(),
        output,
        completed_at: Utc::now(),
    }))
}
