//! Navigation state machine.
//!
//! One current [`Screen`], a total transition function over typed
//! [`Intent`]s, and the timers scheduled by each screen.

use std::time::{Duration, Instant};

use tracing::debug;

use calcvault_types::{Intent, Screen};

use crate::scheduler::{ScheduledTask, Scheduler, TaskId, TimerKind};

/// Resolve the next screen. Pairs not in the table fall back to the calculator.
#[must_use]
pub fn transition(from: Screen, intent: Intent) -> Screen {
    match (from, intent) {
        (Screen::InitialSetup, Intent::SetupComplete) => Screen::Calculator,
        (Screen::Calculator, Intent::SecretDetected) => Screen::VaultLogin,
        (Screen::VaultLogin, Intent::LoginSuccess) => Screen::VaultDashboard,
        (Screen::VaultDashboard, Intent::Navigate(target)) if target.is_vault_subpage() => target,
        (from, Intent::Back) if from.is_vault_subpage() => Screen::VaultDashboard,
        (Screen::Settings, Intent::DataWiped) => Screen::InitialSetup,
        // Logout lands here too.
        _ => Screen::Calculator,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

impl Transition {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: Screen,
    scheduler: Scheduler,
}

impl Navigator {
    #[must_use]
    pub fn new(initial: Screen) -> Self {
        Self {
            current: initial,
            scheduler: Scheduler::new(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply `intent`. Leaving a screen cancels every timer it owns.
    pub fn dispatch(&mut self, intent: Intent) -> Transition {
        let from = self.current;
        let to = transition(from, intent);
        if from != to {
            self.scheduler.cancel_owned_by(from);
        }
        self.current = to;
        debug!(%from, %to, ?intent, "Navigation");
        Transition { from, to }
    }

    /// Schedule a timer owned by the current screen.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TaskId {
        self.scheduler.schedule(kind, self.current, now, delay)
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.scheduler.is_pending(kind)
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledTask> {
        self.scheduler.take_due(now)
    }

    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Jump straight to `screen`, dropping every timer.
    pub fn reset(&mut self, screen: Screen) {
        self.scheduler.clear();
        self.current = screen;
        debug!(%screen, "Navigation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCREENS: [Screen; 9] = [
        Screen::InitialSetup,
        Screen::Calculator,
        Screen::VaultLogin,
        Screen::VaultDashboard,
        Screen::Files,
        Screen::Gallery,
        Screen::Notes,
        Screen::Trash,
        Screen::Settings,
    ];

    #[test]
    fn happy_path_transitions() {
        assert_eq!(
            transition(Screen::InitialSetup, Intent::SetupComplete),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::Calculator, Intent::SecretDetected),
            Screen::VaultLogin
        );
        assert_eq!(
            transition(Screen::VaultLogin, Intent::LoginSuccess),
            Screen::VaultDashboard
        );
        assert_eq!(
            transition(Screen::VaultDashboard, Intent::Navigate(Screen::Notes)),
            Screen::Notes
        );
        assert_eq!(
            transition(Screen::Notes, Intent::Back),
            Screen::VaultDashboard
        );
        assert_eq!(
            transition(Screen::Settings, Intent::DataWiped),
            Screen::InitialSetup
        );
    }

    #[test]
    fn logout_returns_to_calculator() {
        for from in [Screen::VaultLogin, Screen::VaultDashboard, Screen::Settings] {
            assert_eq!(transition(from, Intent::Logout), Screen::Calculator);
        }
    }

    #[test]
    fn navigate_only_works_from_dashboard_toward_subpages() {
        assert_eq!(
            transition(Screen::Files, Intent::Navigate(Screen::Notes)),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::VaultDashboard, Intent::Navigate(Screen::VaultLogin)),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::Calculator, Intent::Navigate(Screen::VaultDashboard)),
            Screen::Calculator
        );
    }

    #[test]
    fn undefined_pairs_fall_back_to_calculator() {
        assert_eq!(
            transition(Screen::InitialSetup, Intent::LoginSuccess),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::VaultDashboard, Intent::Back),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::Calculator, Intent::LoginSuccess),
            Screen::Calculator
        );
        assert_eq!(
            transition(Screen::Notes, Intent::DataWiped),
            Screen::Calculator
        );
    }

    #[test]
    fn vault_is_never_entered_without_login() {
        let intents = [
            Intent::SetupComplete,
            Intent::SecretDetected,
            Intent::Logout,
            Intent::Back,
            Intent::DataWiped,
            Intent::Navigate(Screen::Notes),
            Intent::Navigate(Screen::VaultDashboard),
        ];
        for from in ALL_SCREENS.into_iter().filter(|s| !s.is_unlocked()) {
            for intent in intents {
                assert!(
                    !transition(from, intent).is_unlocked(),
                    "{from} --{intent:?}--> unlocked screen"
                );
            }
        }
    }

    #[test]
    fn leaving_a_screen_cancels_its_timers() {
        let mut nav = Navigator::new(Screen::Calculator);
        let now = Instant::now();
        nav.schedule(TimerKind::SecretAccess, now, Duration::from_secs(1));
        assert!(nav.is_pending(TimerKind::SecretAccess));

        let t = nav.dispatch(Intent::SecretDetected);
        assert!(t.changed());
        assert_eq!(nav.current(), Screen::VaultLogin);
        assert!(!nav.is_pending(TimerKind::SecretAccess));
        assert!(nav.take_due(now + Duration::from_secs(2)).is_empty());
    }

    #[test]
    fn staying_on_a_screen_keeps_its_timers() {
        let mut nav = Navigator::new(Screen::Calculator);
        let now = Instant::now();
        nav.schedule(TimerKind::SecretAccess, now, Duration::from_secs(1));

        let t = nav.dispatch(Intent::Logout);
        assert!(!t.changed());
        assert!(nav.is_pending(TimerKind::SecretAccess));
    }

    #[test]
    fn reset_drops_everything() {
        let mut nav = Navigator::new(Screen::Settings);
        nav.schedule(TimerKind::LockoutExpiry, Instant::now(), Duration::from_secs(30));
        nav.reset(Screen::InitialSetup);
        assert_eq!(nav.current(), Screen::InitialSetup);
        assert!(nav.next_due().is_none());
    }
}
