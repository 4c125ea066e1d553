//! Per-session slot store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::TurnIndex;

use super::slot::{Slot, SlotName, SlotValue};

/// A proposal against a confirmed slot holding a different value.
///
/// Carries both values so the controller can ask the user to confirm
/// before overwriting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("slot '{name}' already confirmed as '{existing}', conflicting proposal '{proposed}'")]
pub struct SlotConflict {
    pub name: SlotName,
    pub existing: SlotValue,
    pub proposed: SlotValue,
}

/// Outcome of proposing a value into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// Value accepted and confirmed.
    Accepted,
    /// Slot already held the same confirmed value; nothing changed.
    AlreadyConfirmed,
    /// Conflicting value against a confirmed slot without a correction flag.
    Conflict(SlotConflict),
}

/// Mapping from slot name to confirmed slot, scoped to one session.
///
/// Created at session start, mutated only through [`SlotStore::propose`],
/// discarded at session end. Iteration order is stable (BTreeMap) so
/// evaluation and rendering are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStore {
    slots: BTreeMap<SlotName, Slot>,
}

impl SlotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for a name, if present.
    pub fn get(&self, name: SlotName) -> Option<&Slot> {
        self.slots.get(&name)
    }

    /// Returns true if the slot is present and confirmed.
    pub fn is_confirmed(&self, name: SlotName) -> bool {
        self.get(name).map(|s| s.confirmed).unwrap_or(false)
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slots are stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over stored slots in stable name order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// Proposes a value for a slot.
    ///
    /// Rules:
    /// - absent slot: accepted and confirmed
    /// - confirmed slot, same value: idempotent, nothing changes
    /// - confirmed slot, different value, `correction` false: conflict
    /// - confirmed slot, different value, `correction` true: overwritten
    pub fn propose(
        &mut self,
        name: SlotName,
        value: SlotValue,
        turn: TurnIndex,
        correction: bool,
    ) -> ProposalOutcome {
        match self.slots.get(&name) {
            Some(existing) if existing.confirmed => {
                if existing.value == value {
                    ProposalOutcome::AlreadyConfirmed
                } else if correction {
                    self.slots.insert(name, Slot::confirmed(name, value, turn));
                    ProposalOutcome::Accepted
                } else {
                    ProposalOutcome::Conflict(SlotConflict {
                        name,
                        existing: existing.value.clone(),
                        proposed: value,
                    })
                }
            }
            _ => {
                self.slots.insert(name, Slot::confirmed(name, value, turn));
                ProposalOutcome::Accepted
            }
        }
    }
}
