//! Service catalog: which slots each service needs and how to ask for them.
//!
//! The catalog is static configuration, read-only at session runtime.
//! A built-in default mirrors the production rule set; deployments can
//! override it with a JSON file.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::slots::{SlotName, SlotValue};

use super::service::Service;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Predicate a filled slot must satisfy for the requirement to count
/// as met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SlotPredicate {
    /// Boolean slot must be true.
    BoolTrue,
    /// Integer slot must be at least `min`.
    MinInteger { min: i64 },
    /// Integer slot must lie within [min, max].
    IntegerRange { min: i64, max: i64 },
    /// Text slot must mention at least one keyword (case-insensitive).
    ContainsAny { keywords: Vec<String> },
    /// The slot only needs to be known; any value satisfies it.
    ValueKnown,
}

impl SlotPredicate {
    /// Checks the predicate against a slot value.
    pub fn check(&self, value: &SlotValue) -> bool {
        match self {
            SlotPredicate::BoolTrue => value.as_bool() == Some(true),
            SlotPredicate::MinInteger { min } => {
                value.as_integer().map(|n| n >= *min).unwrap_or(false)
            }
            SlotPredicate::IntegerRange { min, max } => value
                .as_integer()
                .map(|n| n >= *min && n <= *max)
                .unwrap_or(false),
            SlotPredicate::ContainsAny { keywords } => match value.as_text() {
                Some(text) => {
                    let lower = text.to_lowercase();
                    keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
                }
                None => false,
            },
            SlotPredicate::ValueKnown => true,
        }
    }

    /// Human-readable reason for a failed check.
    pub fn failure_reason(&self, name: SlotName, value: &SlotValue) -> String {
        match self {
            SlotPredicate::BoolTrue => format!("{} was answered no", name),
            SlotPredicate::MinInteger { min } => {
                format!("{} of {} is below the minimum of {}", name, value, min)
            }
            SlotPredicate::IntegerRange { min, max } => {
                format!("{} of {} is outside {}..{}", name, value, min, max)
            }
            SlotPredicate::ContainsAny { .. } => {
                format!("no qualifying {} reported", name)
            }
            SlotPredicate::ValueKnown => format!("{} is not known", name),
        }
    }
}

/// One required slot for a service: how to ask for it and what counts
/// as a satisfying answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequirement {
    /// The slot to collect.
    pub name: SlotName,
    /// The question to ask when the slot is missing.
    pub question: String,
    /// Simpler phrasing used after repeated extraction failures.
    pub simplified_question: String,
    /// Check applied once the slot is filled.
    pub predicate: SlotPredicate,
}

/// A service's full eligibility definition.
///
/// `required_slots` order is the question order: ties are broken by
/// declaration, never by arrival, so flows are stable and testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// The service this definition covers.
    pub service: Service,
    /// Required slots in declaration (question) order.
    pub required_slots: Vec<SlotRequirement>,
    /// Alternatives offered on an ineligible outcome. At most five are
    /// ever rendered.
    pub fallback_options: Vec<String>,
    /// Next-step guidance delivered with an eligible determination.
    pub next_steps: String,
}

impl ServiceDefinition {
    /// Returns the requirement for a slot, if this service collects it.
    pub fn requirement(&self, name: SlotName) -> Option<&SlotRequirement> {
        self.required_slots.iter().find(|req| req.name == name)
    }
}

/// Read-only catalog of all service definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl ServiceCatalog {
    /// Creates a catalog from explicit definitions.
    pub fn new(services: Vec<ServiceDefinition>) -> Result<Self, CatalogError> {
        let catalog = Self { services };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in default catalog.
    pub fn builtin() -> &'static ServiceCatalog {
        &BUILTIN_CATALOG
    }

    /// Loads a catalog from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: ServiceCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Returns the definition for a service.
    pub fn get(&self, service: Service) -> Option<&ServiceDefinition> {
        self.services.iter().find(|def| def.service == service)
    }

    /// All defined services in catalog order.
    pub fn services(&self) -> impl Iterator<Item = Service> + '_ {
        self.services.iter().map(|def| def.service)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.services.is_empty() {
            return Err(CatalogError::Invalid("catalog defines no services".into()));
        }
        for def in &self.services {
            if def.required_slots.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "service '{}' has no required slots",
                    def.service
                )));
            }
            for req in &def.required_slots {
                if req.question.matches('?').count() != 1 {
                    return Err(CatalogError::Invalid(format!(
                        "question for slot '{}' of '{}' must contain exactly one '?'",
                        req.name, def.service
                    )));
                }
                if req.simplified_question.matches('?').count() != 1 {
                    return Err(CatalogError::Invalid(format!(
                        "simplified question for slot '{}' of '{}' must contain exactly one '?'",
                        req.name, def.service
                    )));
                }
            }
            if def.fallback_options.len() > 5 {
                return Err(CatalogError::Invalid(format!(
                    "service '{}' declares more than 5 fallback options",
                    def.service
                )));
            }
        }
        Ok(())
    }
}

static BUILTIN_CATALOG: Lazy<ServiceCatalog> = Lazy::new(|| {
    ServiceCatalog::new(vec![
        ServiceDefinition {
            service: Service::Rpm,
            required_slots: vec![
                SlotRequirement {
                    name: SlotName::Age,
                    question: "Could you tell me your age?".into(),
                    simplified_question: "How old are you?".into(),
                    predicate: SlotPredicate::MinInteger { min: 18 },
                },
                SlotRequirement {
                    name: SlotName::ChronicConditions,
                    question: "Do you have any chronic health conditions, such as diabetes, \
                               high blood pressure, COPD, or heart disease?"
                        .into(),
                    simplified_question: "Do you have an ongoing health condition?".into(),
                    predicate: SlotPredicate::ContainsAny {
                        keywords: vec![
                            "diabetes".into(),
                            "hypertension".into(),
                            "high blood pressure".into(),
                            "copd".into(),
                            "heart".into(),
                            "kidney".into(),
                            "asthma".into(),
                        ],
                    },
                },
                SlotRequirement {
                    name: SlotName::InsuranceCoverage,
                    question: "What kind of health insurance do you have, if any?".into(),
                    simplified_question: "Do you have health insurance?".into(),
                    predicate: SlotPredicate::ValueKnown,
                },
            ],
            fallback_options: vec![
                "Wellness education programs".into(),
                "Preventive care scheduling".into(),
                "Pharmacy savings programs".into(),
            ],
            next_steps: "An enrollment specialist will call you within 24 hours, and you'll \
                         receive a confirmation email within 2 hours."
                .into(),
        },
        ServiceDefinition {
            service: Service::Telehealth,
            required_slots: vec![
                SlotRequirement {
                    name: SlotName::Age,
                    question: "Could you tell me your age?".into(),
                    simplified_question: "How old are you?".into(),
                    predicate: SlotPredicate::MinInteger { min: 18 },
                },
                SlotRequirement {
                    name: SlotName::StateLicensed,
                    question: "Do you live in a state where our providers are licensed?".into(),
                    simplified_question: "Which state do you live in?".into(),
                    predicate: SlotPredicate::BoolTrue,
                },
                SlotRequirement {
                    name: SlotName::VideoCapable,
                    question: "Do you have a device with video and audio, like a smartphone \
                               or tablet?"
                        .into(),
                    simplified_question: "Do you have a smartphone?".into(),
                    predicate: SlotPredicate::BoolTrue,
                },
            ],
            fallback_options: vec![
                "In-person primary care referral".into(),
                "Community health center directory".into(),
            ],
            next_steps: "A care coordinator will reach out within 24 hours to schedule your \
                         first virtual visit."
                .into(),
        },
        ServiceDefinition {
            service: Service::Insurance,
            required_slots: vec![
                SlotRequirement {
                    name: SlotName::Age,
                    question: "Could you tell me your age?".into(),
                    simplified_question: "How old are you?".into(),
                    predicate: SlotPredicate::MinInteger { min: 18 },
                },
                SlotRequirement {
                    name: SlotName::EnrollmentWindow,
                    question: "Are you within open enrollment, or have you had a qualifying \
                               life event like moving or losing coverage?"
                        .into(),
                    simplified_question: "Did your coverage situation change recently?".into(),
                    predicate: SlotPredicate::ValueKnown,
                },
                SlotRequirement {
                    name: SlotName::InsuranceCoverage,
                    question: "What coverage do you have today, if any?".into(),
                    simplified_question: "Do you have health insurance right now?".into(),
                    predicate: SlotPredicate::ValueKnown,
                },
            ],
            fallback_options: vec![
                "Medicaid eligibility screening".into(),
                "Pharmacy savings programs".into(),
            ],
            next_steps: "A licensed enrollment counselor will call you within 24 hours to \
                         compare plans."
                .into(),
        },
    ])
    .expect("built-in catalog is valid")
});
