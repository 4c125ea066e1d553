//! Session lifecycle wrapper around a controller.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::controller::DialogueController;

/// A stored session: the controller plus activity bookkeeping.
///
/// Abandoned sessions are expired by the sweeper based on
/// `last_activity`; expiry discards the record, nothing is archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub controller: DialogueController,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl SessionRecord {
    pub fn new(controller: DialogueController) -> Self {
        let now = Timestamp::now();
        Self {
            controller,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.controller.session_id()
    }

    /// Marks activity on the session.
    pub fn touch(&mut self) {
        self.last_activity = Timestamp::now();
    }

    /// Returns true if the session has seen no activity for at least
    /// `idle_secs`.
    pub fn is_idle(&self, now: Timestamp, idle_secs: i64) -> bool {
        now.duration_since(&self.last_activity).num_seconds() >= idle_secs
    }
}
