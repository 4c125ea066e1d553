//! Confirmed-fact storage for a single conversation session.
//!
//! The slot store is the single source of truth for what the user has
//! told us. Nothing downstream re-derives these facts from raw text.

mod slot;
mod store;

pub use slot::{Slot, SlotName, SlotValue, MAX_AGE, MIN_AGE};
pub use store::{ProposalOutcome, SlotConflict, SlotStore};
