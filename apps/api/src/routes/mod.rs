pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers as evaluation;
use crate::interview::handlers as interview;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::tools::handlers as tools;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Agent tool API (serialized payloads)
        .route("/api/v1/tools", get(tools::handle_list_tools))
        .route("/api/v1/tools/:id", post(tools::handle_invoke_tool))
        // Typed API
        .route("/api/v1/programs", get(matching::handle_list_programs))
        .route(
            "/api/v1/programs/search",
            post(matching::handle_search_programs),
        )
        .route("/api/v1/programs/:id", get(matching::handle_get_program))
        .route("/api/v1/interview/next", post(interview::handle_next_question))
        .route("/api/v1/evaluations", post(evaluation::handle_evaluate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::matching::similarity::SimilarityBackend;

    fn test_state() -> AppState {
        let backend = SimilarityBackend::default();
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                catalog_path: None,
                similarity_backend: backend,
            },
            catalog: Arc::new(Catalog::embedded().unwrap()),
            scorer: backend.scorer(),
        }
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["similarity_backend"], "positional");
    }

    #[tokio::test]
    async fn test_tool_manifest() {
        let (status, body) = send("GET", "/api/v1/tools", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[0]["id"], "program-search");
    }

    #[tokio::test]
    async fn test_program_search_tool_accepts_query_field() {
        let (status, body) = send(
            "POST",
            "/api/v1/tools/program-search",
            Some(json!({"query": "online computer science {\"format\":[\"online\"]}"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tool"], "program-search");
        let results: Vec<Value> = serde_json::from_str(body["output"].as_str().unwrap()).unwrap();
        assert!(!results.is_empty() && results.len() <= 5);
        for r in &results {
            let formats = r["format"].as_array().unwrap();
            assert!(formats.contains(&json!("online")));
        }
    }

    #[tokio::test]
    async fn test_evaluation_tool_with_garbage_payload_still_answers() {
        let (status, body) = send(
            "POST",
            "/api/v1/tools/evaluation",
            Some(json!({"payload": "<<not json>>"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let output = body["output"].as_str().unwrap();
        assert!(output.contains("None highlighted"));
        assert!(output.contains("Waitlist"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_404() {
        let (status, body) = send(
            "POST",
            "/api/v1/tools/web-search",
            Some(json!({"query": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_program_by_id() {
        let (status, body) = send("GET", "/api/v1/programs/mba-mit-sloan", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["degree"], "MBA");

        let (status, _) = send("GET", "/api/v1/programs/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_typed_search_uses_profile_constraints() {
        let (status, body) = send(
            "POST",
            "/api/v1/programs/search",
            Some(json!({
                "text": "data science",
                "profile": {"constraints": {"budget_usd": 20000}}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = body.as_array().unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r["tuitionUsd"].as_u64().unwrap() <= 20000));
    }

    #[tokio::test]
    async fn test_typed_search_rejects_negative_budget() {
        let (status, _) = send(
            "POST",
            "/api/v1/programs/search",
            Some(json!({"text": "x", "constraints": {"budget_usd": -1}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_typed_interview_next() {
        let (status, body) = send(
            "POST",
            "/api/v1/interview/next",
            Some(json!({"askedCount": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"done": true}));
    }

    #[tokio::test]
    async fn test_typed_evaluation_returns_result_and_report() {
        let (status, body) = send(
            "POST",
            "/api/v1/evaluations",
            Some(json!({
                "transcript": {"courses": ["A", "B"], "grades": [3.9, 2.8], "trend": "improving"},
                "interviewResponses": []
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["verdict"], "waitlist");
        assert_eq!(body["result"]["strengths"], json!(["A (3.9)", "Improving GPA trend"]));
        assert!(body["report"].as_str().unwrap().starts_with("=== Academic Strengths ==="));
    }
}
