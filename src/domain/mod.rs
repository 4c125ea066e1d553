//! Domain layer: pure conversation logic with no I/O.
//!
//! Everything here is deterministic and synchronous. Transport,
//! storage, and the paraphrasing backend live in the adapter layer.

pub mod dialogue;
pub mod eligibility;
pub mod extraction;
pub mod formatting;
pub mod foundation;
pub mod slots;
