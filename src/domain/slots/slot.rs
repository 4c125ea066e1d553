//! Slot value objects.
//!
//! A slot is a single user-provided fact needed for eligibility
//! evaluation: age, chronic conditions, insurance coverage, and so on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{TurnIndex, ValidationError};

/// Minimum age accepted by the extraction layer.
pub const MIN_AGE: i64 = 18;

/// Maximum age accepted by the extraction layer.
pub const MAX_AGE: i64 = 120;

/// The closed set of facts the assistant collects.
///
/// Serialized snake_case so catalog files and API payloads use the
/// same names the rule definitions do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    /// Patient age in years.
    Age,
    /// Qualifying chronic conditions (diabetes, hypertension, COPD, ...).
    ChronicConditions,
    /// Current health insurance coverage.
    InsuranceCoverage,
    /// Access to a smartphone, tablet, or home Wi-Fi.
    DeviceAccess,
    /// Consent to share health data for remote monitoring.
    ConsentMonitoring,
    /// Lives in a state where providers are licensed.
    StateLicensed,
    /// Has a device with video and audio capability.
    VideoCapable,
    /// Within open enrollment or qualifies for a special period.
    EnrollmentWindow,
}

impl SlotName {
    /// All slot names in a stable order.
    pub fn all() -> &'static [SlotName] {
        &[
            SlotName::Age,
            SlotName::ChronicConditions,
            SlotName::InsuranceCoverage,
            SlotName::DeviceAccess,
            SlotName::ConsentMonitoring,
            SlotName::StateLicensed,
            SlotName::VideoCapable,
            SlotName::EnrollmentWindow,
        ]
    }

    /// The snake_case identifier used in catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Age => "age",
            SlotName::ChronicConditions => "chronic_conditions",
            SlotName::InsuranceCoverage => "insurance_coverage",
            SlotName::DeviceAccess => "device_access",
            SlotName::ConsentMonitoring => "consent_monitoring",
            SlotName::StateLicensed => "state_licensed",
            SlotName::VideoCapable => "video_capable",
            SlotName::EnrollmentWindow => "enrollment_window",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotName::all()
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("slot_name", format!("unknown slot '{}'", s))
            })
    }
}

/// Typed payload of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum SlotValue {
    /// Whole-number fact such as age.
    Integer(i64),
    /// Yes/no fact such as consent.
    Bool(bool),
    /// One of an enumerated set, e.g. an insurance kind.
    Choice(String),
    /// Free text the rules only check for presence or keywords.
    Text(String),
}

impl SlotValue {
    /// Returns the integer payload, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SlotValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SlotValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string payload of a choice or text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Choice(s) | SlotValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Integer(n) => write!(f, "{}", n),
            SlotValue::Bool(true) => write!(f, "yes"),
            SlotValue::Bool(false) => write!(f, "no"),
            SlotValue::Choice(s) | SlotValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A confirmed user-provided fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Which fact this is.
    pub name: SlotName,
    /// The typed payload.
    pub value: SlotValue,
    /// Whether the value is confirmed. Confirmed slots are only
    /// overwritten by an explicit user correction.
    pub confirmed: bool,
    /// The turn on which the value was provided.
    pub source_turn: TurnIndex,
}

impl Slot {
    /// Creates a confirmed slot.
    pub fn confirmed(name: SlotName, value: SlotValue, source_turn: TurnIndex) -> Self {
        Self {
            name,
            value,
            confirmed: true,
            source_turn,
        }
    }
}
