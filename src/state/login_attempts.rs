//! Failed-login counting with a temporary lockout.
//!
//! The record survives restarts through the `loginAttempts` storage key.
//! Expiry is lazy: an elapsed lockout or reset window is cleared the next
//! time the record is restored or checked, no timer is involved.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::SharedClock;
use crate::state::format_remaining;
use crate::storage::{self, SharedStore, LOGIN_ATTEMPTS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub max_attempts: u32,
    pub lockout_duration: Duration,
    /// Attempts are forgotten once this long has passed since the last one.
    pub reset_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_duration: Duration::from_secs(15 * 60),
            reset_duration: Duration::from_secs(60 * 60),
        }
    }
}

/// Persisted form of the attempt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttemptRecord {
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub last_attempt_time: Option<u64>,
    #[serde(default)]
    pub lockout_until: Option<u64>,
}

/// Snapshot for the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptsStatus {
    pub current: u32,
    pub remaining: u32,
    pub is_at_limit: bool,
    pub is_locked: bool,
    pub remaining_lockout_ms: u64,
    pub remaining_time_text: String,
}

pub struct LoginAttempts {
    policy: LockoutPolicy,
    record: LoginAttemptRecord,
    clock: SharedClock,
    store: SharedStore,
}

impl LoginAttempts {
    /// Restores the stored record, clearing it if it has already lapsed.
    pub fn new(policy: LockoutPolicy, clock: SharedClock, store: SharedStore) -> Self {
        let record = storage::load_json(store.as_ref(), LOGIN_ATTEMPTS_KEY).unwrap_or_default();
        let mut attempts = Self {
            policy,
            record,
            clock,
            store,
        };
        attempts.check_status();
        attempts
    }

    pub fn policy(&self) -> LockoutPolicy {
        self.policy
    }

    pub fn attempts(&self) -> u32 {
        self.record.attempts
    }

    pub fn record(&self) -> LoginAttemptRecord {
        self.record
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.record.lockout_until, Some(until) if self.clock.now_ms() < until)
    }

    pub fn remaining_lockout_ms(&self) -> u64 {
        match self.record.lockout_until {
            Some(until) if self.is_locked() => until.saturating_sub(self.clock.now_ms()),
            _ => 0,
        }
    }

    /// Clears the record when its lockout has elapsed or when the reset
    /// window since the last attempt has passed. Returns whether it cleared.
    pub fn check_status(&mut self) -> bool {
        let now = self.clock.now_ms();
        let lockout_elapsed = matches!(self.record.lockout_until, Some(until) if now >= until);
        let window_elapsed = self.record.lockout_until.is_none()
            && matches!(
                self.record.last_attempt_time,
                Some(last) if now.saturating_sub(last) > self.policy.reset_duration.as_millis() as u64
            );
        if lockout_elapsed || window_elapsed {
            debug!(lockout_elapsed, window_elapsed, "login attempt record lapsed");
            self.reset();
            return true;
        }
        false
    }

    /// Records a login attempt. Success clears everything; a failure counts
    /// towards the lockout. Failures while locked out are not counted.
    pub fn record_attempt(&mut self, success: bool) {
        if success {
            self.reset();
            return;
        }
        self.check_status();
        if self.is_locked() {
            debug!("ignoring failed attempt during lockout");
            return;
        }

        let now = self.clock.now_ms();
        let attempts = self.record.attempts.saturating_add(1);
        let lockout_until = (attempts >= self.policy.max_attempts)
            .then(|| now + self.policy.lockout_duration.as_millis() as u64);
        if lockout_until.is_some() {
            info!(attempts, "too many failed logins, locking out");
        } else {
            debug!(attempts, "failed login recorded");
        }
        self.record = LoginAttemptRecord {
            attempts,
            last_attempt_time: Some(now),
            lockout_until,
        };
        storage::save_json(self.store.as_ref(), LOGIN_ATTEMPTS_KEY, &self.record);
    }

    pub fn reset(&mut self) {
        self.record = LoginAttemptRecord::default();
        storage::remove_key(self.store.as_ref(), LOGIN_ATTEMPTS_KEY);
    }

    /// Time left in the lockout, e.g. "15 min" or "2 h"; empty when unlocked.
    pub fn remaining_time_text(&self) -> String {
        if !self.is_locked() {
            return String::new();
        }
        let minutes = self.remaining_lockout_ms().div_ceil(60_000);
        if minutes >= 60 {
            format!("{} h", minutes.div_ceil(60))
        } else {
            format_remaining(self.remaining_lockout_ms())
        }
    }

    pub fn status(&self) -> AttemptsStatus {
        let current = self.record.attempts;
        AttemptsStatus {
            current,
            remaining: self.policy.max_attempts.saturating_sub(current),
            is_at_limit: current >= self.policy.max_attempts,
            is_locked: self.is_locked(),
            remaining_lockout_ms: self.remaining_lockout_ms(),
            remaining_time_text: self.remaining_time_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::storage::{FailingStore, KeyValueStore, MemoryStore};
    use std::sync::Arc;

    const MINUTE: u64 = 60_000;

    fn setup() -> (ManualClock, Arc<MemoryStore>, LoginAttempts) {
        let clock = ManualClock::default();
        let store = Arc::new(MemoryStore::new());
        let attempts = LoginAttempts::new(LockoutPolicy::default(), Arc::new(clock.clone()), store.clone());
        (clock, store, attempts)
    }

    fn fail(attempts: &mut LoginAttempts, times: u32) {
        for _ in 0..times {
            attempts.record_attempt(false);
        }
    }

    #[test]
    fn locks_after_exactly_max_attempts() {
        let (_clock, _store, mut attempts) = setup();
        fail(&mut attempts, 4);
        assert!(!attempts.is_locked());
        assert_eq!(attempts.status().remaining, 1);

        attempts.record_attempt(false);
        assert!(attempts.is_locked());
        let status = attempts.status();
        assert!(status.is_at_limit);
        assert_eq!(status.remaining_lockout_ms, 15 * MINUTE);
        assert_eq!(status.remaining_time_text, "15 min");
    }

    #[test]
    fn success_clears_lock_and_storage() {
        let (clock, store, mut attempts) = setup();
        fail(&mut attempts, 5);
        assert!(store.get(LOGIN_ATTEMPTS_KEY).unwrap().is_some());

        clock.advance(MINUTE);
        attempts.record_attempt(true);
        assert_eq!(attempts.attempts(), 0);
        assert!(!attempts.is_locked());
        assert!(store.get(LOGIN_ATTEMPTS_KEY).unwrap().is_none());
    }

    #[test]
    fn failures_during_lockout_are_not_counted() {
        let (clock, _store, mut attempts) = setup();
        fail(&mut attempts, 5);
        let until = attempts.record().lockout_until;
        clock.advance(MINUTE);
        attempts.record_attempt(false);
        assert_eq!(attempts.attempts(), 5);
        assert_eq!(attempts.record().lockout_until, until);
    }

    #[test]
    fn elapsed_lockout_clears_on_next_check() {
        let (clock, store, mut attempts) = setup();
        fail(&mut attempts, 5);
        clock.advance(15 * MINUTE);
        assert!(!attempts.is_locked());
        assert!(attempts.check_status());
        assert_eq!(attempts.record(), LoginAttemptRecord::default());
        assert!(store.get(LOGIN_ATTEMPTS_KEY).unwrap().is_none());
    }

    #[test]
    fn stale_attempts_reset_after_window() {
        let (clock, _store, mut attempts) = setup();
        fail(&mut attempts, 3);
        clock.advance(61 * MINUTE);
        attempts.record_attempt(false);
        assert_eq!(attempts.attempts(), 1);
    }

    #[test]
    fn record_is_restored_and_lazily_expired() {
        let clock = ManualClock::default();
        let store = Arc::new(MemoryStore::new());
        {
            let mut attempts =
                LoginAttempts::new(LockoutPolicy::default(), Arc::new(clock.clone()), store.clone());
            fail(&mut attempts, 5);
        }

        clock.advance(5 * MINUTE);
        let restored = LoginAttempts::new(LockoutPolicy::default(), Arc::new(clock.clone()), store.clone());
        assert!(restored.is_locked());
        assert_eq!(restored.attempts(), 5);
        assert_eq!(restored.remaining_time_text(), "10 min");

        clock.advance(10 * MINUTE);
        let expired = LoginAttempts::new(LockoutPolicy::default(), Arc::new(clock.clone()), store.clone());
        assert!(!expired.is_locked());
        assert_eq!(expired.attempts(), 0);
        assert!(store.get(LOGIN_ATTEMPTS_KEY).unwrap().is_none());
    }

    #[test]
    fn stored_layout_uses_camel_case_keys() {
        let (clock, store, mut attempts) = setup();
        attempts.record_attempt(false);
        let raw = store.get(LOGIN_ATTEMPTS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["attempts"], 1);
        assert_eq!(json["lastAttemptTime"], clock.now_ms());
        assert!(json["lockoutUntil"].is_null());
    }

    #[test]
    fn long_lockouts_report_hours() {
        let clock = ManualClock::default();
        let policy = LockoutPolicy {
            max_attempts: 1,
            lockout_duration: Duration::from_secs(90 * 60),
            ..LockoutPolicy::default()
        };
        let mut attempts = LoginAttempts::new(policy, Arc::new(clock), Arc::new(MemoryStore::new()));
        attempts.record_attempt(false);
        assert_eq!(attempts.remaining_time_text(), "2 h");
    }

    #[test]
    fn works_without_storage() {
        let clock = ManualClock::default();
        let mut attempts = LoginAttempts::new(LockoutPolicy::default(), Arc::new(clock), Arc::new(FailingStore));
        fail(&mut attempts, 5);
        assert!(attempts.is_locked());
        attempts.record_attempt(true);
        assert!(!attempts.is_locked());
    }
}
