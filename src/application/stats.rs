//! Session lifecycle counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Monotonic counters shared between the handlers and the sweeper.
///
/// Active sessions are counted from the store at read time; only the
/// lifecycle events are accumulated here.
#[derive(Debug, Default)]
pub struct SessionStats {
    created: AtomicU64,
    ended: AtomicU64,
    expired: AtomicU64,
}

impl SessionStats {
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ended(&self) {
        self.ended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self, count: u64) {
        self.expired.fetch_add(count, Ordering::Relaxed);
    }

    /// A point-in-time reading, with the caller supplying the live
    /// session count.
    pub fn snapshot(&self, active: usize) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            active,
            created: self.created.load(Ordering::Relaxed),
            ended: self.ended.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatsSnapshot {
    pub active: usize,
    pub created: u64,
    pub ended: u64,
    pub expired: u64,
}
