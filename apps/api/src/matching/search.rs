//! Program search: hard filters over the catalog, similarity ranking, and
//! human-readable reasons for every returned program.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogProgram, DeliveryFormat};
use crate::matching::similarity::{embed, SimilarityScorer};
use crate::models::profile::StudentProfile;

/// Upper bound on returned programs. Fewer survivors means fewer results, never padding.
pub const MAX_RESULTS: usize = 5;

/// Inline JSON object running to the end of a query string.
static INLINE_CONSTRAINTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}$").expect("inline constraint pattern is valid"));

// ────────────────────────────────────────────────────────────────────────────
// Query model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConstraints {
    pub target_degree: Option<String>,
    pub fields: Vec<String>,
    pub budget_usd: Option<f64>,
    pub remote_ok: bool,
    pub location: Option<String>,
    pub format: Vec<DeliveryFormat>,
}

impl SearchConstraints {
    /// Seeds constraints from a stored student profile.
    pub fn from_profile(profile: &StudentProfile) -> Self {
        SearchConstraints {
            target_degree: profile.goals.target_degree.clone(),
            fields: profile.goals.field.clone(),
            budget_usd: profile
                .constraints
                .budget_usd
                .filter(|_| profile.has_budget()),
            remote_ok: profile.constraints.remote_ok.unwrap_or(false),
            location: None,
            format: profile.preferences.format.clone(),
        }
    }

    pub fn target_degree(&self) -> Option<&str> {
        non_blank(self.target_degree.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    fn admits(&self, program: &CatalogProgram) -> bool {
        if let Some(budget) = self.budget_usd {
            if f64::from(program.tuition_usd) > budget {
                return false;
            }
        }
        self.format.is_empty() || program.offers_any(&self.format)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub text: String,
    pub constraints: SearchConstraints,
}

impl SearchQuery {
    /// Free text plus every constraint value, as one string for embedding.
    pub fn combined_text(&self) -> String {
        let c = &self.constraints;
        let formats: Vec<&str> = c.format.iter().map(DeliveryFormat::as_str).collect();
        [
            self.text.as_str(),
            c.target_degree().unwrap_or(""),
            c.fields.join(" ").as_str(),
            formats.join(" ").as_str(),
            c.location().unwrap_or(""),
            if c.remote_ok { "remote" } else { "" },
        ]
        .join(" ")
    }
}

/// One ranked program with the evidence for ranking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMatch {
    pub id: String,
    pub name: String,
    pub university: String,
    pub location: String,
    pub tuition_usd: u32,
    pub format: Vec<DeliveryFormat>,
    pub reasons: Vec<String>,
    #[serde(skip)]
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Serialized query parsing
// ────────────────────────────────────────────────────────────────────────────

/// Splits an agent-written query into free text and constraints.
///
/// The query may end with a JSON object such as
/// `{"target_degree":"Master's","fields":["Data Science"],"budget_usd":30000,"format":["hybrid"]}`.
/// The object is always removed from the free text. If it does not parse, the
/// query carries no constraints. Keys of the wrong type are ignored one by one.
pub fn parse_query_text(raw: &str) -> SearchQuery {
    let Some(m) = INLINE_CONSTRAINTS.find(raw) else {
        return SearchQuery {
            text: raw.to_string(),
            constraints: SearchConstraints::default(),
        };
    };

    let text = raw[..m.start()].trim().to_string();
    let constraints = match serde_json::from_str::<Value>(m.as_str()) {
        Ok(Value::Object(obj)) => constraints_from_object(&obj),
        Ok(_) => SearchConstraints::default(),
        Err(e) => {
            warn!("Ignoring unparseable inline search constraints: {e}");
            SearchConstraints::default()
        }
    };

    SearchQuery { text, constraints }
}

fn constraints_from_object(obj: &Map<String, Value>) -> SearchConstraints {
    let string_list = |key: &str| -> Vec<String> {
        obj.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    SearchConstraints {
        target_degree: obj
            .get("target_degree")
            .and_then(Value::as_str)
            .map(str::to_string),
        fields: string_list("fields"),
        budget_usd: obj.get("budget_usd").and_then(Value::as_f64),
        remote_ok: obj
            .get("remote_ok")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        location: obj.get("location").and_then(Value::as_str).map(str::to_string),
        format: string_list("format")
            .iter()
            .filter_map(|f| f.parse::<DeliveryFormat>().ok())
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Search
// ────────────────────────────────────────────────────────────────────────────

/// Ranks the catalog against `query` and returns at most `MAX_RESULTS` programs.
///
/// Algorithm:
/// 1. Embed the combined query text.
/// 2. Drop programs over budget or without any requested format.
/// 3. Score survivors against `name university fields description location`.
/// 4. Stable sort by descending score and keep the top `MAX_RESULTS`.
pub fn search(
    catalog: &Catalog,
    scorer: &dyn SimilarityScorer,
    query: &SearchQuery,
) -> Vec<ProgramMatch> {
    let query_vector = embed(&query.combined_text());

    let mut scored: Vec<(&CatalogProgram, f64)> = catalog
        .programs()
        .iter()
        .filter(|p| query.constraints.admits(p))
        .map(|p| (p, scorer.score(&query_vector, &embed(&p.search_text()))))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    debug!(
        "Search over {} programs kept {} after filters (backend: {})",
        catalog.len(),
        scored.len(),
        scorer.backend().as_str()
    );

    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(program, score)| ProgramMatch {
            id: program.id.clone(),
            name: program.name.clone(),
            university: program.university.clone(),
            location: program.location.clone(),
            tuition_usd: program.tuition_usd,
            format: program.format.clone(),
            reasons: build_reasons(program, score, &query.constraints),
            score,
        })
        .collect()
}

/// Justifications, each emitted only when its evidence holds for this program.
fn build_reasons(program: &CatalogProgram, score: f64, c: &SearchConstraints) -> Vec<String> {
    let mut reasons = vec![format!("Matches query with score {score:.2}")];

    let aligned: Vec<&str> = c
        .fields
        .iter()
        .filter(|wanted| program.field.iter().any(|f| f.eq_ignore_ascii_case(wanted)))
        .map(String::as_str)
        .collect();
    if !aligned.is_empty() {
        reasons.push(format!("Aligned to fields: {}", aligned.join(", ")));
    }

    if let Some(budget) = c.budget_usd {
        reasons.push(format!("Within budget (<= {budget})"));
    }

    if !c.format.is_empty() {
        reasons.push("Preferred format available".to_string());
    }

    if let Some(degree) = c.target_degree() {
        if program.degree.eq_ignore_ascii_case(degree) {
            reasons.push(format!("Degree matches: {degree}"));
        }
    }

    reasons
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
