//! Service identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The healthcare services the assistant can assess eligibility for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Remote Patient Monitoring.
    Rpm,
    /// Telehealth / virtual primary care.
    Telehealth,
    /// Health insurance enrollment assistance.
    Insurance,
}

impl Service {
    /// All services in presentation order.
    pub fn all() -> &'static [Service] {
        &[Service::Rpm, Service::Telehealth, Service::Insurance]
    }

    /// Short identifier used in config files and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Rpm => "rpm",
            Service::Telehealth => "telehealth",
            Service::Insurance => "insurance",
        }
    }

    /// Human-readable service name used in rendered responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Rpm => "Remote Patient Monitoring",
            Service::Telehealth => "Telehealth",
            Service::Insurance => "Insurance Enrollment",
        }
    }

    /// One-line description for service listings.
    pub fn description(&self) -> &'static str {
        match self {
            Service::Rpm => "monitor chronic conditions from home with connected devices",
            Service::Telehealth => "virtual doctor visits and prescription management from home",
            Service::Insurance => "help finding and enrolling in a health insurance plan",
        }
    }

    /// Recognizes a service mention anywhere in lowercased text.
    ///
    /// Accepts the surface forms users actually type: "rpm",
    /// "remote patient monitoring", "telehealth", "virtual visit",
    /// "insurance", and so on.
    pub fn from_mention(lowercased: &str) -> Option<Service> {
        if lowercased.contains("rpm") || lowercased.contains("remote patient monitoring") {
            Some(Service::Rpm)
        } else if lowercased.contains("telehealth")
            || lowercased.contains("virtual visit")
            || lowercased.contains("virtual care")
            || lowercased.contains("virtual primary care")
            || lowercased.contains("video doctor")
        {
            Some(Service::Telehealth)
        } else if lowercased.contains("insurance")
            || lowercased.contains("medicare enrollment")
            || lowercased.contains("health plan")
        {
            Some(Service::Insurance)
        } else {
            None
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Service {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::all()
            .iter()
            .find(|svc| svc.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("service", format!("unknown service '{}'", s))
            })
    }
}
