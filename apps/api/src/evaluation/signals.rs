//! Keyword classifiers over interview answers.
//!
//! Each classifier is independent; one answer can fire several of them.

use once_cell::sync::Lazy;
use regex::Regex;

pub const PROACTIVE_IMPROVEMENT: &str = "Demonstrated proactive improvement efforts";
// Flags any mention of language or English as a risk, whatever the context.
pub const LANGUAGE_SUPPORT: &str = "Language proficiency may need support";
pub const OUTSIDE_RESPONSIBILITIES: &str = "Family/work responsibilities impacted activities";

static IMPROVEMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tutor|study|improv").expect("improvement pattern is valid"));
static LANGUAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)language|english").expect("language pattern is valid"));
static RESPONSIBILITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)family|work|responsib").expect("responsibility pattern is valid")
});

/// What a single answer revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerSignals {
    pub personal_quality: Option<&'static str>,
    pub risk: Option<&'static str>,
    pub special_circumstance: Option<&'static str>,
}

pub fn classify_answer(answer: &str) -> AnswerSignals {
    AnswerSignals {
        personal_quality: IMPROVEMENT_PATTERN
            .is_match(answer)
            .then_some(PROACTIVE_IMPROVEMENT),
        risk: LANGUAGE_PATTERN.is_match(answer).then_some(LANGUAGE_SUPPORT),
        special_circumstance: RESPONSIBILITY_PATTERN
            .is_match(answer)
            .then_some(OUTSIDE_RESPONSIBILITIES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_for_neutral_answer() {
        assert_eq!(classify_answer("I like robots."), AnswerSignals::default());
    }

    #[test]
    fn test_improvement_is_case_insensitive_and_partial() {
        let s = classify_answer("I hired a TUTOR and my grades Improved");
        assert_eq!(s.personal_quality, Some(PROACTIVE_IMPROVEMENT));
        assert_eq!(s.risk, None);
    }

    #[test]
    fn test_multiple_classifiers_fire_together() {
        let s = classify_answer("I study English at night after work to support my family");
        assert_eq!(s.personal_quality, Some(PROACTIVE_IMPROVEMENT));
        assert_eq!(s.risk, Some(LANGUAGE_SUPPORT));
        assert_eq!(s.special_circumstance, Some(OUTSIDE_RESPONSIBILITIES));
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // "homework" contains "work"
        let s = classify_answer("Homework load was heavy");
        assert_eq!(s.special_circumstance, Some(OUTSIDE_RESPONSIBILITIES));
    }
}
