//! Interview question selection: at most five targeted questions, one per call.
//!
//! The running Q&A list lives with the caller; each call receives the count so
//! far and a snapshot of the profile and transcript.

use serde::{Deserialize, Serialize};

use crate::models::profile::{GradeTrend, StudentProfile, Transcript};

pub const MAX_QUESTIONS: usize = 5;

const IMPROVEMENT_QUESTION: &str = "Your GPA improved recently. What drove that change?";
const ENGLISH_QUESTION: &str = "English appears lower than STEM. What challenges did you face?";
const OUTSIDE_RESPONSIBILITIES_QUESTION: &str =
    "Were you involved in work, family responsibilities, or projects outside school?";
const CATCH_ALL_QUESTION: &str =
    "Is there any context the admissions team should know about your academic journey?";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewState {
    /// Kept as sent; a fractional count is compared as-is, not rounded.
    pub asked_count: f64,
    pub last_answer: String,
    pub profile: StudentProfile,
    pub transcript: Transcript,
}

/// `{"done": true}` or `{"done": false, "question": "..."}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewStep {
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl InterviewStep {
    pub fn done() -> Self {
        InterviewStep {
            done: true,
            question: None,
        }
    }

    pub fn ask(question: impl Into<String>) -> Self {
        InterviewStep {
            done: false,
            question: Some(question.into()),
        }
    }
}

/// Picks the next interview question.
///
/// Targeted candidates (trend, English signal, missing experience) come first in
/// declaration order, trimmed so that candidates plus questions already asked
/// never exceed `MAX_QUESTIONS`. Profile gaps are the fallback, then a catch-all.
pub fn next_question(state: &InterviewState) -> InterviewStep {
    let limit = MAX_QUESTIONS as f64;
    if state.asked_count >= limit {
        return InterviewStep::done();
    }

    let mut candidates = targeted_questions(&state.profile, &state.transcript);
    while !candidates.is_empty() && candidates.len() as f64 + state.asked_count > limit {
        candidates.pop();
    }

    let gaps = profile_gaps(&state.profile, &state.transcript);

    let question = candidates
        .first()
        .or_else(|| gaps.first())
        .copied()
        .unwrap_or(CATCH_ALL_QUESTION);

    InterviewStep::ask(question)
}

fn targeted_questions(profile: &StudentProfile, transcript: &Transcript) -> Vec<&'static str> {
    let mut questions = Vec::new();
    if transcript.trend == Some(GradeTrend::Improving) {
        questions.push(IMPROVEMENT_QUESTION);
    }
    if transcript.english_lower {
        questions.push(ENGLISH_QUESTION);
    }
    if !profile.has_experience() {
        questions.push(OUTSIDE_RESPONSIBILITIES_QUESTION);
    }
    questions
}

/// Structured fields the counselor still needs.
fn profile_gaps(profile: &StudentProfile, transcript: &Transcript) -> Vec<&'static str> {
    let mut gaps = Vec::new();
    if !profile.has_field_goal() {
        gaps.push("Preferred field of study");
    }
    if !profile.has_budget() {
        gaps.push("Budget constraints");
    }
    if transcript.trend.is_none() {
        gaps.push("Grade trend context");
    }
    gaps
}
