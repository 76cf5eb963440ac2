use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::matching::similarity::SimilarityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once before the listener starts; read-only afterwards.
    pub catalog: Arc<Catalog>,
    /// Pluggable similarity backend. Default: PositionalScorer. Swap via SIMILARITY_BACKEND.
    pub scorer: Arc<dyn SimilarityScorer>,
}
