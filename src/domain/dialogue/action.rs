//! Structured outputs of the dialogue controller.
//!
//! The controller never produces prose. It emits one of these actions
//! per turn and the response formatter turns it into text, so every
//! user-visible sentence traces back to a template.

use serde::{Deserialize, Serialize};

use crate::domain::eligibility::Service;
use crate::domain::slots::{SlotName, SlotValue};

/// Why the controller is asking again instead of moving on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ClarifyNote {
    OutOfRange { min: i64, max: i64 },
    Ambiguous,
    Unrecognized,
}

/// One dialogue action, rendered into exactly one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ControllerAction {
    /// Present the available services, optionally acknowledging slot
    /// values the user volunteered before picking one.
    ListServices {
        services: Vec<Service>,
        acknowledged: Vec<SlotName>,
    },
    /// Ask for one slot, no acknowledgment.
    AskSlot {
        service: Service,
        slot: SlotName,
        question: String,
    },
    /// One micro-acknowledgment of what was captured, then one question.
    AcknowledgeAndAsk {
        service: Service,
        acknowledged: Vec<(SlotName, SlotValue)>,
        slot: SlotName,
        question: String,
    },
    /// Re-ask after an answer could not be used.
    Clarify {
        service: Service,
        slot: SlotName,
        question: String,
        note: ClarifyNote,
    },
    /// A new value conflicts with a confirmed one; ask before replacing.
    ConfirmCorrection {
        slot: SlotName,
        existing: SlotValue,
        proposed: SlotValue,
    },
    /// All requirements met.
    DeliverEligible {
        service: Service,
        next_steps: String,
    },
    /// A requirement failed; offer alternatives.
    DeliverIneligible {
        service: Service,
        reasons: Vec<String>,
        fallback_options: Vec<String>,
    },
    /// Steer an off-script utterance back to the interrupted prompt.
    Redirect { resume: Box<ControllerAction> },
    /// Repeat next steps after the determination has been delivered.
    ReaffirmNextSteps {
        service: Service,
        next_steps: String,
    },
    /// Emergency symptoms mentioned; direct to emergency services.
    EscalateEmergency,
}

impl ControllerAction {
    /// List-form responses get bullet bounds instead of prose bounds.
    pub fn is_list(&self) -> bool {
        match self {
            Self::ListServices { .. } => true,
            Self::DeliverIneligible { fallback_options, .. } => !fallback_options.is_empty(),
            Self::Redirect { resume } => resume.is_list(),
            _ => false,
        }
    }

    /// The slot this action is asking about, if it asks one.
    pub fn asked_slot(&self) -> Option<SlotName> {
        match self {
            Self::AskSlot { slot, .. }
            | Self::AcknowledgeAndAsk { slot, .. }
            | Self::Clarify { slot, .. }
            | Self::ConfirmCorrection { slot, .. } => Some(*slot),
            Self::Redirect { resume } => resume.asked_slot(),
            _ => None,
        }
    }
}
