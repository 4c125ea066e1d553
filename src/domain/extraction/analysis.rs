//! Extraction output types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::eligibility::Service;
use crate::domain::slots::{SlotName, SlotValue};

/// Coarse confidence of a slot candidate.
///
/// Explicit phrasings ("I'm 78 years old") beat implied ones (a bare
/// "78" while we happen to be asking for age). No finer granularity is
/// warranted by the material the rules derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Implied,
    Explicit,
}

/// A typed value extracted from an utterance, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCandidate {
    pub name: SlotName,
    pub value: SlotValue,
    pub confidence: Confidence,
}

impl SlotCandidate {
    pub fn explicit(name: SlotName, value: SlotValue) -> Self {
        Self {
            name,
            value,
            confidence: Confidence::Explicit,
        }
    }

    pub fn implied(name: SlotName, value: SlotValue) -> Self {
        Self {
            name,
            value,
            confidence: Confidence::Implied,
        }
    }
}

/// What the user is doing with this utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent")]
pub enum UtteranceIntent {
    /// Names a specific service ("I need RPM").
    ServiceRequest { service: Service },
    /// Asks to see everything ("what else", "show me everything").
    BroadenRequest,
    /// Answers a question with slot content.
    SlotAnswer,
    /// Corrects an earlier answer ("actually, I'm 65").
    Correction,
    /// Informal acknowledgment or affect ("okie doke", "frustrated",
    /// "what?"). Never a slot update.
    Acknowledgment,
    /// Unrelated to healthcare ("what restaurants do you recommend").
    OffTopic,
    /// Describes emergency symptoms; overrides everything else.
    Emergency,
    /// Nothing recognizable.
    Unrecognized,
}

/// Result of analyzing one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceAnalysis {
    pub intent: UtteranceIntent,
    /// Slot candidates found in the text, empty for non-slot intents.
    pub candidates: Vec<SlotCandidate>,
}

impl UtteranceAnalysis {
    /// An analysis with an intent and no candidates.
    pub fn of(intent: UtteranceIntent) -> Self {
        Self {
            intent,
            candidates: Vec::new(),
        }
    }

    /// An analysis carrying slot candidates.
    pub fn with_candidates(intent: UtteranceIntent, candidates: Vec<SlotCandidate>) -> Self {
        Self { intent, candidates }
    }
}

/// Recoverable extraction failures.
///
/// None of these surface to the end user; the controller re-prompts
/// with a clarifying or simplified phrasing instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("value {actual} for slot '{slot}' is outside [{min}, {max}]")]
    OutOfRange {
        slot: SlotName,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("ambiguous answer for slot '{slot}': {reason}")]
    Ambiguous { slot: SlotName, reason: String },

    #[error("could not interpret an answer for slot '{slot}'")]
    Unrecognized { slot: SlotName },
}
