//! Eligibility evaluation results.

use serde::{Deserialize, Serialize};

use crate::domain::slots::SlotName;

use super::service::Service;

/// Verdict of evaluating a service against the current slot store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum EligibilityStatus {
    /// All required slots present and every predicate satisfied.
    Eligible,
    /// All required slots present but at least one predicate failed.
    Ineligible,
    /// A required slot is still missing; names the next one to collect.
    Pending { required_slot: SlotName },
}

impl EligibilityStatus {
    /// Returns true if all information has been collected.
    pub fn is_settled(&self) -> bool {
        !matches!(self, EligibilityStatus::Pending { .. })
    }
}

/// Full evaluation output for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// The evaluated service.
    pub service: Service,
    /// The verdict.
    pub status: EligibilityStatus,
    /// Human-readable reasons, in requirement declaration order.
    pub reasons: Vec<String>,
}

impl EligibilityResult {
    /// Creates a pending result naming the next slot to collect.
    pub fn pending(service: Service, required_slot: SlotName) -> Self {
        Self {
            service,
            status: EligibilityStatus::Pending { required_slot },
            reasons: vec![format!("waiting on {}", required_slot)],
        }
    }

    /// Returns the next slot to collect, if the result is pending.
    pub fn required_slot(&self) -> Option<SlotName> {
        match self.status {
            EligibilityStatus::Pending { required_slot } => Some(required_slot),
            _ => None,
        }
    }

    /// Returns true if the verdict is eligible.
    pub fn is_eligible(&self) -> bool {
        self.status == EligibilityStatus::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_result_names_the_slot() {
        let result = EligibilityResult::pending(Service::Rpm, SlotName::Age);
        assert_eq!(result.required_slot(), Some(SlotName::Age));
        assert!(!result.status.is_settled());
        assert!(!result.is_eligible());
    }

    #[test]
    fn status_serializes_with_tag() {
        let status = EligibilityStatus::Pending {
            required_slot: SlotName::Age,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "{\"status\":\"pending\",\"required_slot\":\"age\"}");
    }
}
