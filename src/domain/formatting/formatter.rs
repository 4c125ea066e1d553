//! Deterministic templates from controller actions to response text.

use crate::domain::dialogue::{ClarifyNote, ControllerAction};
use crate::domain::slots::{SlotName, SlotValue};

use super::bounds::ResponseShape;

/// Renders controller actions into user-facing text.
///
/// Templates are fixed. Every question-bearing response contains
/// exactly one question mark, and every rendering stays inside the
/// bounds in [`super::bounds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn new() -> Self {
        Self
    }

    /// The bounds shape this action renders under.
    pub fn shape(&self, action: &ControllerAction) -> ResponseShape {
        if action.is_list() {
            ResponseShape::List
        } else {
            ResponseShape::Prose
        }
    }

    pub fn render(&self, action: &ControllerAction) -> String {
        match action {
            ControllerAction::ListServices {
                services,
                acknowledged,
            } => {
                let mut out = String::new();
                if acknowledged.is_empty() {
                    out.push_str("Hello! Here are the services I can check eligibility for:\n");
                } else {
                    out.push_str(&format!(
                        "Thanks, I've noted your {}. Here are the services I can check eligibility for:\n",
                        join_labels(acknowledged)
                    ));
                }
                for service in services {
                    out.push_str(&format!("- {}\n", service.display_name()));
                }
                out.push_str("Which one would you like to look into?");
                out
            }
            ControllerAction::AskSlot { question, .. } => question.clone(),
            ControllerAction::AcknowledgeAndAsk {
                acknowledged,
                question,
                ..
            } => {
                format!(
                    "Got it, I've recorded {}. {}",
                    join_values(acknowledged),
                    question
                )
            }
            ControllerAction::Clarify { question, note, .. } => {
                let preface = match note {
                    ClarifyNote::OutOfRange { min, max } => {
                        format!("I need a value between {} and {} there.", min, max)
                    }
                    ClarifyNote::Ambiguous => "I heard more than one answer there.".to_string(),
                    ClarifyNote::Unrecognized => "Sorry, I didn't catch that.".to_string(),
                };
                format!("{} {}", preface, question)
            }
            ControllerAction::ConfirmCorrection {
                slot,
                existing,
                proposed,
            } => {
                format!(
                    "Earlier you told me your {} was {}, but now I heard {}. Should I update it to {}?",
                    label(*slot),
                    existing,
                    proposed,
                    proposed
                )
            }
            ControllerAction::DeliverEligible {
                service,
                next_steps,
            } => {
                format!(
                    "Good news, you qualify for {}. {}",
                    service.display_name(),
                    next_steps
                )
            }
            ControllerAction::DeliverIneligible {
                service,
                reasons,
                fallback_options,
            } => {
                let mut out = format!(
                    "Based on what you've shared, {} isn't a match right now",
                    service.display_name()
                );
                if let Some(reason) = reasons.first() {
                    out.push_str(&format!(": {}", reason));
                }
                out.push('.');
                if fallback_options.is_empty() {
                    out.push_str(" An agent can help you look at other options.");
                } else {
                    out.push_str(" Here are some alternatives that may help:\n");
                    for option in fallback_options {
                        out.push_str(&format!("- {}\n", option));
                    }
                    out.push_str("Would you like to hear more about any of these?");
                }
                out
            }
            ControllerAction::Redirect { resume } => {
                format!(
                    "I can't help with that one, but I'm glad to keep going on your health needs. {}",
                    self.render(resume)
                )
            }
            ControllerAction::ReaffirmNextSteps {
                service,
                next_steps,
            } => {
                format!(
                    "You're all set with {}. {}",
                    service.display_name(),
                    next_steps
                )
            }
            ControllerAction::EscalateEmergency => {
                "If this is a medical emergency, please call 911 right away. \
                 I can't help with urgent symptoms here. We can pick this back up once you're safe."
                    .to_string()
            }
        }
    }
}

fn label(slot: SlotName) -> &'static str {
    match slot {
        SlotName::Age => "age",
        SlotName::ChronicConditions => "chronic conditions",
        SlotName::InsuranceCoverage => "insurance coverage",
        SlotName::DeviceAccess => "device access",
        SlotName::ConsentMonitoring => "consent to monitoring",
        SlotName::StateLicensed => "state availability",
        SlotName::VideoCapable => "video capability",
        SlotName::EnrollmentWindow => "enrollment window",
    }
}

fn join_labels(names: &[SlotName]) -> String {
    let labels: Vec<&str> = names.iter().map(|n| label(*n)).collect();
    labels.join(" and ")
}

fn join_values(values: &[(SlotName, SlotValue)]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|(name, value)| format!("your {} as {}", label(*name), value))
        .collect();
    parts.join(" and ")
}
