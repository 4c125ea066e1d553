//! Eligibility rules engine.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::slots::SlotStore;

use super::catalog::ServiceCatalog;
use super::result::{EligibilityResult, EligibilityStatus};
use super::service::Service;

/// Evaluates services against a slot store.
///
/// Evaluation is a pure function of (catalog, store): no hidden state,
/// no side effects. Missing slots surface in declaration order.
#[derive(Debug, Clone)]
pub struct RulesEngine<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> RulesEngine<'a> {
    /// Creates an engine over a catalog.
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    /// Evaluates one service against the current slot store.
    pub fn evaluate(
        &self,
        service: Service,
        store: &SlotStore,
    ) -> Result<EligibilityResult, DomainError> {
        let def = self.catalog.get(service).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ServiceNotFound,
                format!("service '{}' is not in the catalog", service),
            )
        })?;

        // First missing slot in declared order wins.
        for req in &def.required_slots {
            if store.get(req.name).is_none() {
                return Ok(EligibilityResult::pending(service, req.name));
            }
        }

        // All slots present: run every predicate and collect reasons.
        let mut reasons = Vec::new();
        let mut all_met = true;
        for req in &def.required_slots {
            let slot = store
                .get(req.name)
                .expect("presence checked above; store is not mutated during evaluation");
            if req.predicate.check(&slot.value) {
                reasons.push(format!("{} requirement met", req.name));
            } else {
                all_met = false;
                reasons.push(req.predicate.failure_reason(req.name, &slot.value));
            }
        }

        let status = if all_met {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::Ineligible
        };

        Ok(EligibilityResult {
            service,
            status,
            reasons,
        })
    }
}
