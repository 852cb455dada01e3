//! Access controller: compares entered codes and enforces the lockout policy.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use calcvault_types::{AccessResult, Password};

/// Consecutive failures that trigger a lockout.
pub const MAX_ATTEMPTS: u8 = 3;
/// How long a lockout lasts.
pub const LOCKOUT_DURATION: Duration = Duration::from_secs(30);

/// Failed-attempt counter and lockout deadline. Never persisted.
#[derive(Debug, Default, Clone)]
pub struct AccessController {
    failed_count: u8,
    locked_until: Option<Instant>,
}

impl AccessController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `code` against the stored password.
    ///
    /// While locked, no comparison happens. A missing credential never matches.
    pub fn submit(&mut self, code: &str, stored: Option<&Password>, now: Instant) -> AccessResult {
        self.expire_if_due(now);
        if self.is_locked(now) {
            debug!("Access attempt rejected while locked");
            return AccessResult::Locked;
        }

        if stored.is_some_and(|password| password.matches(code)) {
            self.failed_count = 0;
            info!("Vault access granted");
            return AccessResult::Granted;
        }

        self.failed_count = self.failed_count.saturating_add(1);
        if self.failed_count >= MAX_ATTEMPTS {
            self.locked_until = Some(now + LOCKOUT_DURATION);
            info!(
                seconds = LOCKOUT_DURATION.as_secs(),
                "Vault locked after repeated failures"
            );
            AccessResult::Locked
        } else {
            let remaining = MAX_ATTEMPTS - self.failed_count;
            debug!(remaining, "Access attempt rejected");
            AccessResult::RejectedWithRemaining(remaining)
        }
    }

    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Leave the locked state once the window has elapsed.
    ///
    /// Returns `true` when a lock was lifted by this call.
    pub fn expire_if_due(&mut self, now: Instant) -> bool {
        match self.locked_until {
            Some(until) if now >= until => {
                self.reset();
                debug!("Lockout expired");
                true
            }
            _ => false,
        }
    }

    /// Time left in the current lockout, if any.
    #[must_use]
    pub fn lock_remaining(&self, now: Instant) -> Option<Duration> {
        self.locked_until
            .and_then(|until| until.checked_duration_since(now))
            .filter(|remaining| !remaining.is_zero())
    }

    #[must_use]
    pub fn failed_count(&self) -> u8 {
        self.failed_count
    }

    #[must_use]
    pub fn locked_until(&self) -> Option<Instant> {
        self.locked_until
    }

    pub fn reset(&mut self) {
        self.failed_count = 0;
        self.locked_until = None;
    }
}
