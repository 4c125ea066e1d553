//! Service catalog and eligibility rules engine.
//!
//! Evaluation is deterministic and side-effect free: the same slot
//! store always yields the same result, and the next question to ask
//! is always the first missing slot in declaration order.

mod catalog;
mod engine;
mod result;
mod service;

pub use catalog::{CatalogError, ServiceCatalog, ServiceDefinition, SlotPredicate, SlotRequirement};
pub use engine::RulesEngine;
pub use result::{EligibilityResult, EligibilityStatus};
pub use service::Service;
