//! Idle-session expiry.
//!
//! The guard is polled from the event loop (`check_status` once a second)
//! rather than owning a timer. The session record is mirrored under the
//! `sessionInfo` storage key so a restart within the timeout resumes it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::SharedClock;
use crate::state::{format_duration, format_remaining};
use crate::storage::{self, SharedStore, SESSION_INFO_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub session_timeout: Duration,
    /// How long before expiry the warning starts showing.
    pub warning_time: Duration,
    pub auto_logout: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            session_timeout: Duration::from_secs(30 * 60),
            warning_time: Duration::from_secs(5 * 60),
            auto_logout: true,
        }
    }
}

impl SessionPolicy {
    fn timeout_ms(&self) -> u64 {
        self.session_timeout.as_millis() as u64
    }

    fn warning_ms(&self) -> u64 {
        self.warning_time.as_millis() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub start_time: u64,
    pub last_activity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Inactive,
    Active,
    Warning,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub elapsed_text: String,
    pub remaining_text: String,
    pub progress_percent: f64,
}

pub struct SessionGuard {
    policy: SessionPolicy,
    record: Option<SessionRecord>,
    phase: SessionPhase,
    remaining_ms: u64,
    clock: SharedClock,
    store: SharedStore,
}

impl SessionGuard {
    /// Resumes a stored session whose last activity is within the timeout;
    /// a stale stored session is removed.
    pub fn new(policy: SessionPolicy, clock: SharedClock, store: SharedStore) -> Self {
        let mut guard = Self {
            policy,
            record: None,
            phase: SessionPhase::Inactive,
            remaining_ms: 0,
            clock,
            store,
        };

        if let Some(stored) = storage::load_json::<SessionRecord>(guard.store.as_ref(), SESSION_INFO_KEY) {
            let idle = guard.clock.now_ms().saturating_sub(stored.last_activity);
            if idle < policy.timeout_ms() {
                info!(idle_ms = idle, "resuming stored session");
                guard.record = Some(stored);
                guard.phase = SessionPhase::Active;
                guard.check_status();
            } else {
                debug!(idle_ms = idle, "dropping stale stored session");
                storage::remove_key(guard.store.as_ref(), SESSION_INFO_KEY);
            }
        }
        guard
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn record(&self) -> Option<SessionRecord> {
        self.record
    }

    pub fn is_active(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.phase == SessionPhase::Expired
    }

    pub fn show_warning(&self) -> bool {
        self.phase == SessionPhase::Warning
    }

    /// Milliseconds until expiry as of the last status check; only non-zero
    /// while the warning is showing.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    fn persist(&self) {
        if let Some(record) = &self.record {
            storage::save_json(self.store.as_ref(), SESSION_INFO_KEY, record);
        }
    }

    pub fn start_session(&mut self) {
        let now = self.clock.now_ms();
        self.record = Some(SessionRecord {
            start_time: now,
            last_activity: now,
        });
        self.phase = SessionPhase::Active;
        self.remaining_ms = 0;
        info!("session started");
        self.persist();
    }

    pub fn end_session(&mut self) {
        self.record = None;
        self.phase = SessionPhase::Inactive;
        self.remaining_ms = 0;
        storage::remove_key(self.store.as_ref(), SESSION_INFO_KEY);
    }

    /// Restarts the session clock, leaving Warning or Expired. Returns false
    /// when there is no session record to extend.
    pub fn extend_session(&mut self) -> bool {
        let now = self.clock.now_ms();
        let Some(record) = self.record.as_mut() else {
            return false;
        };
        record.start_time = now;
        record.last_activity = now;
        self.phase = SessionPhase::Active;
        self.remaining_ms = 0;
        debug!("session extended");
        self.persist();
        true
    }

    /// Marks user activity. Ignored once the session has expired.
    pub fn update_activity(&mut self) {
        if self.is_expired() {
            return;
        }
        let now = self.clock.now_ms();
        let Some(record) = self.record.as_mut() else {
            return;
        };
        record.last_activity = now;
        self.persist();
    }

    /// Re-evaluates the phase from the time since the last activity.
    pub fn check_status(&mut self) -> SessionPhase {
        let Some(record) = self.record else {
            return self.phase;
        };
        let idle = self.clock.now_ms().saturating_sub(record.last_activity);
        let timeout = self.policy.timeout_ms();

        if idle > timeout {
            info!(idle_ms = idle, "session expired");
            if self.policy.auto_logout {
                self.end_session();
            }
            self.phase = SessionPhase::Expired;
            self.remaining_ms = 0;
        } else if idle > timeout.saturating_sub(self.policy.warning_ms()) {
            if self.phase != SessionPhase::Warning {
                debug!(remaining_ms = timeout - idle, "session about to expire");
            }
            self.phase = SessionPhase::Warning;
            self.remaining_ms = timeout - idle;
        } else {
            self.phase = SessionPhase::Active;
            self.remaining_ms = 0;
        }
        self.phase
    }

    /// "N min", or "H h M min" from an hour up; empty outside the warning.
    pub fn remaining_time_text(&self) -> String {
        if self.remaining_ms == 0 {
            String::new()
        } else {
            format_remaining(self.remaining_ms)
        }
    }

    pub fn stats(&self) -> Option<SessionStats> {
        let record = self.record?;
        let now = self.clock.now_ms();
        let timeout = self.policy.timeout_ms();
        let elapsed_ms = now.saturating_sub(record.start_time);
        let remaining_ms = timeout.saturating_sub(now.saturating_sub(record.last_activity));
        let progress_percent = if timeout == 0 {
            100.0
        } else {
            (elapsed_ms as f64 / timeout as f64 * 100.0).min(100.0)
        };
        Some(SessionStats {
            elapsed_ms,
            remaining_ms,
            elapsed_text: format_duration(elapsed_ms),
            remaining_text: format_duration(remaining_ms),
            progress_percent,
        })
    }
}
