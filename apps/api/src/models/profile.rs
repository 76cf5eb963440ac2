#![allow(dead_code)]

//! Student-side records handed to the tools by the counseling agent.
//!
//! These are snapshots of documents owned by the external profile store; the
//! service only ever reads them. Every field is optional on the wire, and a
//! field of the wrong shape falls back to its default without taking the rest
//! of the record with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::DeliveryFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    #[serde(deserialize_with = "lenient")]
    pub goals: Goals,
    #[serde(deserialize_with = "lenient")]
    pub constraints: Constraints,
    #[serde(deserialize_with = "lenient")]
    pub background: Background,
    #[serde(deserialize_with = "lenient")]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    #[serde(deserialize_with = "lenient")]
    pub target_degree: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub field: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub timeline_months: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    #[serde(deserialize_with = "lenient")]
    pub budget_usd: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub visa: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub remote_ok: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    #[serde(deserialize_with = "lenient_list")]
    pub education: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub gpa_scale: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub tests: Vec<String>,
    /// Free-form entries (strings or objects); only their presence matters here.
    #[serde(deserialize_with = "lenient_list")]
    pub experience: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Unknown formats are dropped.
    #[serde(deserialize_with = "lenient_list")]
    pub format: Vec<DeliveryFormat>,
}

impl StudentProfile {
    pub fn has_experience(&self) -> bool {
        !self.background.experience.is_empty()
    }

    pub fn has_field_goal(&self) -> bool {
        !self.goals.field.is_empty()
    }

    /// Only a positive budget counts as provided.
    pub fn has_budget(&self) -> bool {
        matches!(self.constraints.budget_usd, Some(b) if b > 0.0)
    }
}

/// Coarse grade trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeTrend {
    Improving,
    Stable,
    Declining,
    /// Any other label; counts as "trend recorded" but carries no signal.
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transcript {
    #[serde(deserialize_with = "lenient_list")]
    pub courses: Vec<String>,
    /// Aligned with `courses` by index. Non-numeric entries become `None`.
    #[serde(deserialize_with = "lenient_grades")]
    pub grades: Vec<Option<f64>>,
    #[serde(deserialize_with = "lenient")]
    pub trend: Option<GradeTrend>,
    #[serde(deserialize_with = "lenient")]
    pub english_lower: bool,
}

impl Transcript {
    /// Pairs each course with its grade. Courses past the end of `grades`
    /// get `None`.
    pub fn graded_courses(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.courses
            .iter()
            .enumerate()
            .map(|(i, course)| (course.as_str(), self.grades.get(i).copied().flatten()))
    }
}

/// One interview question and the student's answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewQa {
    pub question: String,
    pub answer: String,
}

/// Reads one field, falling back to `T::default()` when it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Reads an array item by item, dropping the items that do not fit `T`.
/// Anything that is not an array is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_grades<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().map(Value::as_f64).collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_deserializes_to_default_profile() {
        let profile: StudentProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, StudentProfile::default());
        assert!(!profile.has_experience());
        assert!(!profile.has_budget());
    }

    #[test]
    fn test_profile_reads_nested_fields() {
        let json = r#"{
            "goals": {"target_degree": "Master's", "field": ["Data Science"]},
            "constraints": {"budget_usd": 30000, "remote_ok": true},
            "background": {"experience": ["Research assistant"]},
            "preferences": {"format": ["hybrid", "online"]}
        }"#;
        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert!(profile.has_field_goal());
        assert!(profile.has_budget());
        assert!(profile.has_experience());
        assert_eq!(
            profile.preferences.format,
            vec![DeliveryFormat::Hybrid, DeliveryFormat::Online]
        );
    }

    #[test]
    fn test_zero_budget_counts_as_missing() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"constraints": {"budget_usd": 0}}"#).unwrap();
        assert!(!profile.has_budget());
    }

    #[test]
    fn test_transcript_camel_case_and_trend() {
        let json = r#"{"courses": ["A"], "grades": [3.9], "trend": "improving", "englishLower": true}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.trend, Some(GradeTrend::Improving));
        assert!(transcript.english_lower);
    }

    #[test]
    fn test_unknown_trend_is_unrecognized() {
        let transcript: Transcript = serde_json::from_str(r#"{"trend": "volatile"}"#).unwrap();
        assert_eq!(transcript.trend, Some(GradeTrend::Unrecognized));
    }

    #[test]
    fn test_non_numeric_grades_become_none() {
        let json = r#"{"courses": ["A", "B", "C"], "grades": [3.9, "n/a", null]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.grades, vec![Some(3.9), None, None]);
    }

    #[test]
    fn test_null_grades_keep_the_rest_of_the_transcript() {
        let json = r#"{"courses": ["A"], "grades": null, "trend": "improving", "englishLower": true}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert!(transcript.grades.is_empty());
        assert_eq!(transcript.courses, vec!["A".to_string()]);
        assert_eq!(transcript.trend, Some(GradeTrend::Improving));
        assert!(transcript.english_lower);
    }

    #[test]
    fn test_wrongly_typed_fields_degrade_one_at_a_time() {
        let json = r#"{
            "goals": {"field": ["Data Science", 7], "timeline_months": "soon"},
            "constraints": {"budget_usd": 30000, "remote_ok": "yes"},
            "background": {"gpa_scale": "4.0", "experience": [{"role": "Intern"}]},
            "preferences": {"format": ["remote", "online"]}
        }"#;
        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.goals.field, vec!["Data Science".to_string()]);
        assert_eq!(profile.goals.timeline_months, None);
        assert!(profile.has_budget());
        assert_eq!(profile.constraints.remote_ok, None);
        assert_eq!(profile.background.gpa_scale, None);
        assert!(profile.has_experience());
        assert_eq!(profile.preferences.format, vec![DeliveryFormat::Online]);
    }

    #[test]
    fn test_non_object_section_falls_back_to_default() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"goals": "grad school", "constraints": {"budget_usd": 5}}"#)
                .unwrap();
        assert_eq!(profile.goals, Goals::default());
        assert!(profile.has_budget());
    }

    #[test]
    fn test_graded_courses_pads_missing_grades() {
        let transcript = Transcript {
            courses: vec!["A".to_string(), "B".to_string()],
            grades: vec![Some(3.2)],
            ..Default::default()
        };
        let pairs: Vec<_> = transcript.graded_courses().collect();
        assert_eq!(pairs, vec![("A", Some(3.2)), ("B", None)]);
    }
}
