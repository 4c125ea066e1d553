//! Keyword-driven utterance analysis.
//!
//! Recognition is deliberately deterministic: fixed keyword sets and
//! token checks, no model in the loop. The generative backend never
//! gets to decide what a user said.

use crate::domain::eligibility::Service;
use crate::domain::slots::{SlotName, SlotValue, MAX_AGE, MIN_AGE};

use super::analysis::{
    ExtractionError, SlotCandidate, UtteranceAnalysis, UtteranceIntent,
};

const EMERGENCY_MARKERS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "trouble breathing",
    "heart attack",
    "stroke",
    "unconscious",
    "severe bleeding",
    "overdose",
    "suicidal",
];

const BROADEN_MARKERS: &[&str] = &[
    "what else",
    "show me everything",
    "all services",
    "other services",
    "other options",
    "everything you offer",
];

const CORRECTION_MARKERS: &[&str] = &[
    "actually",
    "i meant",
    "i said",
    "correction",
    "that's wrong",
    "that is wrong",
    "scratch that",
];

const OFF_TOPIC_MARKERS: &[&str] = &[
    "restaurant",
    "weather",
    "movie",
    "football",
    "basketball",
    "recipe",
    "joke",
    "lottery",
    "vacation",
    "flight",
    "stock market",
];

const CONDITION_KEYWORDS: &[&str] = &[
    "diabetes",
    "diabetic",
    "hypertension",
    "high blood pressure",
    "blood pressure",
    "copd",
    "heart failure",
    "heart disease",
    "heart condition",
    "kidney disease",
    "asthma",
];

const AFFIRMATIVE_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "sure", "correct", "definitely", "absolutely",
];

const NEGATIVE_WORDS: &[&str] = &["no", "nope", "nah", "none"];

const ACK_PHRASES: &[&str] = &[
    "ok",
    "okay",
    "okie doke",
    "okie dokie",
    "k",
    "alright",
    "thanks",
    "thank you",
    "got it",
    "hmm",
    "huh",
    "huh?",
    "what",
    "what?",
];

/// Slots whose natural answer is yes/no.
const BOOLEAN_SLOTS: &[SlotName] = &[
    SlotName::DeviceAccess,
    SlotName::ConsentMonitoring,
    SlotName::StateLicensed,
    SlotName::VideoCapable,
    SlotName::EnrollmentWindow,
];

/// Returns true if the text reads as a plain agreement.
pub fn is_affirmative(text: &str) -> bool {
    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);
    tokens.iter().any(|t| AFFIRMATIVE_WORDS.contains(t))
        || lower.contains("i do")
        || lower.contains("of course")
        || lower.contains("that's right")
}

/// Returns true if the text reads as a plain denial.
pub fn is_negative(text: &str) -> bool {
    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);
    tokens.iter().any(|t| NEGATIVE_WORDS.contains(t))
        || lower.contains("i don't")
        || lower.contains("i dont")
        || lower.contains("not really")
}

fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Pure analyzer from utterance text to intent and slot candidates.
///
/// `awaiting` is the slot the controller just asked for, if any; it
/// disambiguates bare answers like "78" or "yes" without giving the
/// extractor any mutable state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtteranceExtractor;

impl UtteranceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Analyzes one utterance. Side-effect free; conflict handling
    /// against already confirmed slots belongs to the store.
    pub fn analyze(
        &self,
        utterance: &str,
        awaiting: Option<SlotName>,
    ) -> Result<UtteranceAnalysis, ExtractionError> {
        let lower = utterance.trim().to_lowercase();

        if lower.is_empty() {
            // Blank input while a question is open is a failed answer,
            // not a new topic.
            return match awaiting {
                Some(slot) => Err(ExtractionError::Unrecognized { slot }),
                None => Ok(UtteranceAnalysis::of(UtteranceIntent::Unrecognized)),
            };
        }

        // Emergency symptoms override everything, in any state.
        if contains_any(&lower, EMERGENCY_MARKERS) {
            return Ok(UtteranceAnalysis::of(UtteranceIntent::Emergency));
        }

        if contains_any(&lower, BROADEN_MARKERS) {
            return Ok(UtteranceAnalysis::of(UtteranceIntent::BroadenRequest));
        }

        let correction = contains_any(&lower, CORRECTION_MARKERS);
        let candidates = self.extract_candidates(&lower, awaiting)?;

        // An answer for the slot we just asked about wins over an
        // incidental service mention ("I don't have insurance" is an
        // insurance_coverage answer, not an insurance request).
        let answers_awaited = awaiting
            .map(|slot| candidates.iter().any(|c| c.name == slot))
            .unwrap_or(false);

        if !candidates.is_empty() && (answers_awaited || correction) {
            let intent = if correction {
                UtteranceIntent::Correction
            } else {
                UtteranceIntent::SlotAnswer
            };
            return Ok(UtteranceAnalysis::with_candidates(intent, candidates));
        }

        if let Some(service) = Service::from_mention(&lower) {
            return Ok(UtteranceAnalysis::with_candidates(
                UtteranceIntent::ServiceRequest { service },
                candidates,
            ));
        }

        if !candidates.is_empty() {
            return Ok(UtteranceAnalysis::with_candidates(
                UtteranceIntent::SlotAnswer,
                candidates,
            ));
        }

        if self.is_acknowledgment(&lower) {
            return Ok(UtteranceAnalysis::of(UtteranceIntent::Acknowledgment));
        }

        if contains_any(&lower, OFF_TOPIC_MARKERS) {
            return Ok(UtteranceAnalysis::of(UtteranceIntent::OffTopic));
        }

        match awaiting {
            Some(slot) => Err(ExtractionError::Unrecognized { slot }),
            None => Ok(UtteranceAnalysis::of(UtteranceIntent::Unrecognized)),
        }
    }

    fn is_acknowledgment(&self, lower: &str) -> bool {
        if ACK_PHRASES.contains(&lower) {
            return true;
        }
        // Short affect utterances like "i'm frustrated" or "so confused".
        let word_count = tokenize(lower).len();
        word_count <= 4 && (lower.contains("frustrat") || lower.contains("confus"))
    }

    fn extract_candidates(
        &self,
        lower: &str,
        awaiting: Option<SlotName>,
    ) -> Result<Vec<SlotCandidate>, ExtractionError> {
        let mut candidates = Vec::new();

        if let Some(candidate) = self.extract_conditions(lower, awaiting) {
            candidates.push(candidate);
        }
        if let Some(candidate) = self.extract_insurance(lower, awaiting) {
            candidates.push(candidate);
        }
        if let Some(candidate) = self.extract_boolean_answer(lower, awaiting) {
            candidates.push(candidate);
        }

        match self.extract_age(lower, awaiting) {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => {}
            // An out-of-range or ambiguous age only fails the whole
            // analysis when there is nothing else to work with;
            // otherwise the valid candidates proceed.
            Err(err) if candidates.is_empty() => return Err(err),
            Err(_) => {}
        }

        Ok(candidates)
    }

    fn extract_age(
        &self,
        lower: &str,
        awaiting: Option<SlotName>,
    ) -> Result<Option<SlotCandidate>, ExtractionError> {
        let tokens = tokenize(lower);
        let mut numbers = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if let Ok(n) = token.parse::<i64>() {
                // "type 2 diabetes" is not an age statement.
                if i > 0 && tokens[i - 1] == "type" {
                    continue;
                }
                numbers.push(n);
            }
        }

        let explicit_context = lower.contains("year") || lower.contains("age") || {
            lower.starts_with("i'm") || lower.starts_with("im ") || lower.starts_with("i am")
        };
        let awaiting_age = awaiting == Some(SlotName::Age);

        if numbers.is_empty() || !(explicit_context || awaiting_age) {
            return Ok(None);
        }

        numbers.dedup();
        if numbers.len() > 1 {
            return Err(ExtractionError::Ambiguous {
                slot: SlotName::Age,
                reason: "more than one number in the answer".into(),
            });
        }

        let age = numbers[0];
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ExtractionError::OutOfRange {
                slot: SlotName::Age,
                min: MIN_AGE,
                max: MAX_AGE,
                actual: age,
            });
        }

        let candidate = if explicit_context {
            SlotCandidate::explicit(SlotName::Age, SlotValue::Integer(age))
        } else {
            SlotCandidate::implied(SlotName::Age, SlotValue::Integer(age))
        };
        Ok(Some(candidate))
    }

    fn extract_conditions(
        &self,
        lower: &str,
        awaiting: Option<SlotName>,
    ) -> Option<SlotCandidate> {
        let found: Vec<&str> = CONDITION_KEYWORDS
            .iter()
            .filter(|kw| lower.contains(*kw))
            .copied()
            .collect();

        if !found.is_empty() {
            return Some(SlotCandidate::explicit(
                SlotName::ChronicConditions,
                SlotValue::Text(found.join(", ")),
            ));
        }

        // A denial only counts when we asked about conditions.
        if awaiting == Some(SlotName::ChronicConditions) && is_negative(lower) {
            return Some(SlotCandidate::implied(
                SlotName::ChronicConditions,
                SlotValue::Text("none".into()),
            ));
        }
        None
    }

    fn extract_insurance(&self, lower: &str, awaiting: Option<SlotName>) -> Option<SlotCandidate> {
        let kind = if lower.contains("medicare") {
            Some(("medicare", true))
        } else if lower.contains("medicaid") {
            Some(("medicaid", true))
        } else if lower.contains("employer") || lower.contains("private insurance") {
            Some(("private", true))
        } else if lower.contains("no insurance")
            || lower.contains("uninsured")
            || lower.contains("don't have insurance")
            || lower.contains("dont have insurance")
        {
            Some(("none", true))
        } else if awaiting == Some(SlotName::InsuranceCoverage) {
            if is_negative(lower) {
                Some(("none", false))
            } else if is_affirmative(lower) {
                // "yes" to the insurance question: status known, kind not.
                Some(("unspecified", false))
            } else {
                None
            }
        } else {
            None
        };

        kind.map(|(name, explicit)| {
            let value = SlotValue::Choice(name.to_string());
            if explicit {
                SlotCandidate::explicit(SlotName::InsuranceCoverage, value)
            } else {
                SlotCandidate::implied(SlotName::InsuranceCoverage, value)
            }
        })
    }

    fn extract_boolean_answer(
        &self,
        lower: &str,
        awaiting: Option<SlotName>,
    ) -> Option<SlotCandidate> {
        let slot = awaiting.filter(|s| BOOLEAN_SLOTS.contains(s))?;
        if is_affirmative(lower) {
            Some(SlotCandidate::implied(slot, SlotValue::Bool(true)))
        } else if is_negative(lower) {
            Some(SlotCandidate::implied(slot, SlotValue::Bool(false)))
        } else {
            None
        }
    }
}

fn contains_any(lower: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| lower.contains(m))
}
