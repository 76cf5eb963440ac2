//! Tool adapter: the serialized boundary between the counseling agent and the
//! typed core.
//!
//! The agent sends one string per call. This module turns it into typed input
//! on a best-effort basis (anything unparseable becomes an empty default), runs
//! the pure function, and serializes the result back to a string. It never
//! returns an error for a bad payload: the agent has to keep the conversation going.

pub mod handlers;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::evaluation::summarizer::{evaluate, render_report};
use crate::interview::selector::{next_question, InterviewState};
use crate::matching::search::{parse_query_text, search};
use crate::matching::similarity::SimilarityScorer;
use crate::models::profile::{InterviewQa, StudentProfile, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ProgramSearch,
    Interview,
    Evaluation,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::ProgramSearch, ToolKind::Interview, ToolKind::Evaluation];

    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::ProgramSearch => "program-search",
            ToolKind::Interview => "interview",
            ToolKind::Evaluation => "evaluation",
        }
    }

    /// Description handed to the agent alongside the tool id.
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::ProgramSearch => {
                "Search, rank, and explain top programs (up to 5 results with reasons). \
                 Provide a single text query. You MAY end it with a JSON object to guide filtering, \
                 e.g. {\"target_degree\":\"Master's\",\"fields\":[\"Data Science\"],\"budget_usd\":30000,\"format\":[\"hybrid\"]}."
            }
            ToolKind::Interview => {
                "Generate up to 5 targeted interview questions based on GPA, transcript, and \
                 profile completeness. Ask one at a time. Payload: {askedCount, lastAnswer, profile, transcript}."
            }
            ToolKind::Evaluation => {
                "Generate a staff-facing evaluation summary. Never student-facing. \
                 Payload: {profile, transcript, interviewResponses: [{question, answer}]}."
            }
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolManifestEntry {
    pub id: &'static str,
    pub description: &'static str,
}

pub fn manifest() -> Vec<ToolManifestEntry> {
    ToolKind::ALL
        .iter()
        .map(|k| ToolManifestEntry {
            id: k.id(),
            description: k.description(),
        })
        .collect()
}

/// Runs one tool call and returns its serialized output.
pub fn invoke(
    kind: ToolKind,
    payload: &str,
    catalog: &Catalog,
    scorer: &dyn SimilarityScorer,
) -> String {
    match kind {
        ToolKind::ProgramSearch => program_search_tool(payload, catalog, scorer),
        ToolKind::Interview => interview_tool(payload),
        ToolKind::Evaluation => evaluation_tool(payload),
    }
}

/// `query` → JSON array of at most five programs.
pub fn program_search_tool(query: &str, catalog: &Catalog, scorer: &dyn SimilarityScorer) -> String {
    info!("[tool program-search] query: {query}");
    let parsed = parse_query_text(query);
    debug!("[tool program-search] constraints: {:?}", parsed.constraints);
    let results = search(catalog, scorer, &parsed);
    to_json_or(&results, "[]")
}

/// `{askedCount, lastAnswer, profile, transcript}` → `{done, question?}`.
pub fn interview_tool(payload: &str) -> String {
    let obj = payload_object("interview", payload);
    let state = InterviewState {
        asked_count: obj
            .get("askedCount")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        last_answer: obj
            .get("lastAnswer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        profile: field_or_default::<StudentProfile>("interview", &obj, "profile"),
        transcript: field_or_default::<Transcript>("interview", &obj, "transcript"),
    };
    info!(
        "[tool interview] asked_count={} last_answer_len={}",
        state.asked_count,
        state.last_answer.len()
    );
    to_json_or(&next_question(&state), r#"{"done":true}"#)
}

/// `{profile, transcript, interviewResponses}` → plain-text report.
pub fn evaluation_tool(payload: &str) -> String {
    let obj = payload_object("evaluation", payload);
    let transcript = field_or_default::<Transcript>("evaluation", &obj, "transcript");
    let responses: Vec<InterviewQa> = obj
        .get("interviewResponses")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default();
    info!(
        "[tool evaluation] courses={} responses={}",
        transcript.courses.len(),
        responses.len()
    );
    render_report(&evaluate(&transcript, &responses))
}

// ────────────────────────────────────────────────────────────────────────────
// Best-effort payload helpers
// ────────────────────────────────────────────────────────────────────────────

/// Parses `payload` as a JSON object. Blank input is `{}`; anything else that
/// is not an object degrades to an empty map.
fn payload_object(tool: &str, payload: &str) -> Map<String, Value> {
    if payload.trim().is_empty() {
        return Map::new();
    }
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(obj)) => obj,
        Ok(_) => {
            warn!("[tool {tool}] payload is not a JSON object; using defaults");
            Map::new()
        }
        Err(e) => {
            warn!("[tool {tool}] unparseable payload ({e}); using defaults");
            Map::new()
        }
    }
}

fn field_or_default<T: DeserializeOwned + Default>(
    tool: &str,
    obj: &Map<String, Value>,
    key: &str,
) -> T {
    match obj.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("[tool {tool}] ignoring malformed '{key}': {e}");
            T::default()
        }),
    }
}

fn to_json_or<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to serialize tool output: {e}");
        fallback.to_string()
    })
}
