//! Background expiry of abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use crate::application::stats::SessionStats;
use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Periodically deletes sessions with no recent activity.
///
/// Expiry is discard-only; a user who comes back after the idle
/// window starts over with a fresh session.
pub struct SessionSweeper {
    sessions: Arc<dyn SessionStore>,
    stats: Arc<SessionStats>,
    idle_secs: i64,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        stats: Arc<SessionStats>,
        idle_secs: i64,
        interval: Duration,
    ) -> Self {
        Self {
            sessions,
            stats,
            idle_secs,
            interval,
        }
    }

    /// Runs forever; spawn on its own task.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick fires immediately; skip it so a fresh start
        // does not sweep an empty store.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let expired = self.sweep_once().await;
            if expired > 0 {
                tracing::info!(expired, "expired idle sessions");
            }
        }
    }

    /// One pass over the store; returns how many sessions expired.
    pub async fn sweep_once(&self) -> usize {
        let now = Timestamp::now();
        let ids = match self.sessions.list_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(error = %err, "session sweep could not list sessions");
                return 0;
            }
        };

        let mut expired = 0;
        for id in ids {
            // A session deleted or touched between list and load just
            // skips this pass.
            let record = match self.sessions.load(id).await {
                Ok(record) => record,
                Err(_) => continue,
            };
            if record.is_idle(now, self.idle_secs) && self.sessions.delete(id).await.is_ok() {
                tracing::debug!(session_id = %id, "expired idle session");
                expired += 1;
            }
        }
        if expired > 0 {
            self.stats.record_expired(expired as u64);
        }
        expired
    }
}
