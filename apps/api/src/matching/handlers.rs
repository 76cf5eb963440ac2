//! Axum route handlers for the typed catalog and search API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::CatalogProgram;
use crate::errors::AppError;
use crate::matching::search::{search, ProgramMatch, SearchConstraints, SearchQuery};
use crate::models::profile::StudentProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: String,
    /// Explicit constraints win over ones derived from `profile`.
    pub constraints: Option<SearchConstraints>,
    pub profile: Option<StudentProfile>,
}

impl SearchRequest {
    fn into_query(self) -> SearchQuery {
        let constraints = match (self.constraints, self.profile) {
            (Some(c), _) => c,
            (None, Some(profile)) => SearchConstraints::from_profile(&profile),
            (None, None) => SearchConstraints::default(),
        };
        SearchQuery {
            text: self.text,
            constraints,
        }
    }
}

/// GET /api/v1/programs
pub async fn handle_list_programs(State(state): State<AppState>) -> Json<Vec<CatalogProgram>> {
    Json(state.catalog.programs().to_vec())
}

/// GET /api/v1/programs/:id
pub async fn handle_get_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogProgram>, AppError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Program {id} not found")))
}

/// POST /api/v1/programs/search
///
/// Typed search: structured constraints (or a profile to derive them from)
/// instead of JSON embedded in the query string.
pub async fn handle_search_programs(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<ProgramMatch>>, AppError> {
    let query = request.into_query();

    if matches!(query.constraints.budget_usd, Some(b) if b < 0.0) {
        return Err(AppError::Validation(
            "budget_usd cannot be negative".to_string(),
        ));
    }

    Ok(Json(search(&state.catalog, state.scorer.as_ref(), &query)))
}
