//! Cancellable single-shot timers, polled by the session clock.
//!
//! Each task is owned by the screen that scheduled it. Leaving that screen
//! cancels the task, so a timer can never fire into a screen it wasn't meant for.

use std::time::{Duration, Instant};

use tracing::debug;

use calcvault_types::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Open the vault prompt after the calculator produced the sentinel.
    SecretAccess,
    /// Refresh the login screen when a lockout window ends.
    LockoutExpiry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub kind: TimerKind,
    pub owner: Screen,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        kind: TimerKind,
        owner: Screen,
        now: Instant,
        delay: Duration,
    ) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(ScheduledTask {
            id,
            kind,
            owner,
            due: now + delay,
        });
        debug!(?kind, %owner, delay_ms = delay.as_millis(), "Scheduled timer");
        id
    }

    /// Returns `true` if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Cancel every task owned by `owner`. Returns how many were dropped.
    pub fn cancel_owned_by(&mut self, owner: Screen) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != owner);
        let cancelled = before - self.tasks.len();
        if cancelled > 0 {
            debug!(%owner, cancelled, "Cancelled timers on screen exit");
        }
        cancelled
    }

    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.kind != kind);
        before - self.tasks.len()
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.tasks.iter().any(|task| task.kind == kind)
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due, task.id));
        due
    }

    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_when_due() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.schedule(
            TimerKind::SecretAccess,
            Screen::Calculator,
            now,
            Duration::from_secs(1),
        );

        assert!(scheduler.take_due(now + Duration::from_millis(999)).is_empty());
        let fired = scheduler.take_due(now + Duration::from_secs(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, TimerKind::SecretAccess);
        assert!(scheduler.take_due(now + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_order() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        let late = scheduler.schedule(
            TimerKind::LockoutExpiry,
            Screen::VaultLogin,
            now,
            Duration::from_secs(30),
        );
        let early = scheduler.schedule(
            TimerKind::SecretAccess,
            Screen::Calculator,
            now,
            Duration::from_secs(1),
        );
        assert_eq!(scheduler.next_due(), Some(now + Duration::from_secs(1)));

        let fired = scheduler.take_due(now + Duration::from_secs(60));
        let ids: Vec<_> = fired.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![early, late]);
    }

    #[test]
    fn cancel_by_owner_leaves_others() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.schedule(
            TimerKind::SecretAccess,
            Screen::Calculator,
            now,
            Duration::from_secs(1),
        );
        scheduler.schedule(
            TimerKind::LockoutExpiry,
            Screen::VaultLogin,
            now,
            Duration::from_secs(30),
        );

        assert_eq!(scheduler.cancel_owned_by(Screen::Calculator), 1);
        assert!(!scheduler.is_pending(TimerKind::SecretAccess));
        assert!(scheduler.is_pending(TimerKind::LockoutExpiry));
    }

    #[test]
    fn cancel_by_id() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        let id = scheduler.schedule(
            TimerKind::SecretAccess,
            Screen::Calculator,
            now,
            Duration::ZERO,
        );
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(now).is_empty());
    }
}
