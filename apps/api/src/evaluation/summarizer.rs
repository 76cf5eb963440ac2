//! Evaluation summary: staff-facing, never shown to the applicant.
//!
//! Algorithm:
//! 1. Per course: grade ≥ 3.7 → strength, grade ≤ 3.0 → risk, otherwise nothing.
//! 2. Trend: improving → strength, declining → risk.
//! 3. Per interview answer: keyword classifiers (see `signals`).
//! 4. Verdict with a one-item margin: ties and near-ties are a waitlist.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evaluation::signals::classify_answer;
use crate::models::profile::{GradeTrend, InterviewQa, Transcript};

pub const STRENGTH_THRESHOLD: f64 = 3.7;
pub const RISK_THRESHOLD: f64 = 3.0;

const IMPROVING_TREND_NOTE: &str = "Improving GPA trend";
const DECLINING_TREND_NOTE: &str = "Declining GPA trend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Admit,
    Waitlist,
    Reject,
}

impl Verdict {
    fn from_counts(strengths: usize, risks: usize) -> Self {
        if strengths > risks + 1 {
            Verdict::Admit
        } else if risks > strengths + 1 {
            Verdict::Reject
        } else {
            Verdict::Waitlist
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Admit => "Admit",
            Verdict::Waitlist => "Waitlist",
            Verdict::Reject => "Reject",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub personal_qualities: Vec<String>,
    pub special_circumstances: Vec<String>,
    pub verdict: Verdict,
}

pub fn evaluate(transcript: &Transcript, interview_responses: &[InterviewQa]) -> EvaluationResult {
    let mut strengths = Vec::new();
    let mut risks = Vec::new();
    let mut personal_qualities = Vec::new();
    let mut special_circumstances = Vec::new();

    for (course, grade) in transcript.graded_courses() {
        let Some(grade) = grade else { continue };
        if grade >= STRENGTH_THRESHOLD {
            strengths.push(format!("{course} ({grade})"));
        } else if grade <= RISK_THRESHOLD {
            risks.push(format!("{course} ({grade})"));
        }
    }

    match transcript.trend {
        Some(GradeTrend::Improving) => strengths.push(IMPROVING_TREND_NOTE.to_string()),
        Some(GradeTrend::Declining) => risks.push(DECLINING_TREND_NOTE.to_string()),
        _ => {}
    }

    for qa in interview_responses {
        let signals = classify_answer(&qa.answer);
        personal_qualities.extend(signals.personal_quality.map(str::to_string));
        risks.extend(signals.risk.map(str::to_string));
        special_circumstances.extend(signals.special_circumstance.map(str::to_string));
    }

    let verdict = Verdict::from_counts(strengths.len(), risks.len());

    EvaluationResult {
        strengths,
        risks,
        personal_qualities,
        special_circumstances,
        verdict,
    }
}

/// Renders the fixed five-section report the agent relays to staff.
pub fn render_report(result: &EvaluationResult) -> String {
    let section = |items: &[String], empty: &str| -> String {
        if items.is_empty() {
            empty.to_string()
        } else {
            items.join("; ")
        }
    };

    [
        "=== Academic Strengths ===".to_string(),
        section(&result.strengths, "None highlighted"),
        String::new(),
        "=== Academic Weaknesses / Risk Areas ===".to_string(),
        section(&result.risks, "None highlighted"),
        String::new(),
        "=== Personal Qualities / Motivation ===".to_string(),
        section(&result.personal_qualities, "Neutral/insufficient evidence"),
        String::new(),
        "=== Special Circumstances ===".to_string(),
        section(&result.special_circumstances, "None reported"),
        String::new(),
        "=== Overall Recommendation ===".to_string(),
        format!(
            "{} – Based on transcript patterns and interview context.",
            result.verdict
        ),
    ]
    .join("\n")
}
