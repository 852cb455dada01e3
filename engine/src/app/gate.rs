//! First-run setup and vault login.

use tracing::{info, warn};

use calcvault_core::{TimerKind, Toast};
use calcvault_types::{AccessResult, Intent, PASSWORD_MIN_LEN};

use super::App;
use crate::ui::{LoginMessage, SetupStage};

const SETUP_TOO_SHORT: &str = "Password must be at least 4 digits";
const SETUP_MISMATCH: &str = "Passwords do not match";

impl App {
    // ------------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------------

    pub(crate) fn setup_key(&mut self, key: char) {
        if self.view.setup.active_pad().push(key) {
            self.view.setup.error = None;
        }
    }

    pub(crate) fn setup_backspace(&mut self) {
        self.view.setup.active_pad().pop();
    }

    pub fn setup_clear(&mut self) {
        let setup = &mut self.view.setup;
        setup.password.clear();
        setup.confirm.clear();
        setup.stage = SetupStage::Enter;
        setup.error = None;
    }

    /// From the confirmation step, go back to choosing the password.
    pub(crate) fn setup_cancel(&mut self) {
        let setup = &mut self.view.setup;
        if setup.stage == SetupStage::Confirm {
            setup.confirm.clear();
            setup.stage = SetupStage::Enter;
            setup.error = None;
        }
    }

    pub(crate) fn setup_submit(&mut self) {
        match self.view.setup.stage {
            SetupStage::Enter => {
                if self.view.setup.password.len() < PASSWORD_MIN_LEN {
                    self.view.setup.error = Some(SETUP_TOO_SHORT.to_string());
                    return;
                }
                self.view.setup.stage = SetupStage::Confirm;
                self.view.setup.error = None;
            }
            SetupStage::Confirm => {
                if self.view.setup.password.as_str() != self.view.setup.confirm.as_str() {
                    self.view.setup.error = Some(SETUP_MISMATCH.to_string());
                    self.view.setup.confirm.clear();
                    return;
                }
                let password = self.view.setup.password.take();
                self.view.setup.confirm.clear();
                match self.credentials.save(&password) {
                    Ok(()) => {
                        info!("First-run setup complete");
                        self.notify(Toast::success(
                            "Vault created",
                            "You can keep using the calculator normally",
                        ));
                        self.dispatch(Intent::SetupComplete);
                    }
                    Err(err) => {
                        warn!("Setup failed: {err}");
                        self.view.setup.stage = SetupStage::Enter;
                        self.view.setup.error = Some(err.to_string());
                        self.notify(Toast::error("Error", "Could not save the vault password"));
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------------

    pub(crate) fn login_key(&mut self, key: char) {
        self.view.login.code.push(key);
    }

    pub(crate) fn login_backspace(&mut self) {
        self.view.login.code.pop();
    }

    pub fn login_clear(&mut self) {
        self.view.login.code.clear();
    }

    /// "Back to calculator".
    pub fn login_back(&mut self) {
        self.dispatch(Intent::Logout);
    }

    /// Submit the entered code. The keypad is cleared whatever the outcome.
    ///
    /// An empty keypad is not an attempt.
    pub fn login_submit(&mut self) {
        if self.view.login.code.is_empty() {
            return;
        }
        let code = self.view.login.code.take();
        let was_locked = self.access.is_locked(self.clock);
        let stored = self.credentials.password();
        match self.access.submit(&code, stored.as_ref(), self.clock) {
            AccessResult::Granted => {
                self.view.login.message = None;
                self.notify(Toast::success(
                    "Access granted",
                    "Welcome to your secure vault",
                ));
                self.dispatch(Intent::LoginSuccess);
            }
            AccessResult::RejectedWithRemaining(remaining) => {
                self.view.login.message = Some(LoginMessage::Rejected { remaining });
            }
            AccessResult::Locked if was_locked => {
                self.view.login.message = Some(LoginMessage::StillLocked);
            }
            AccessResult::Locked => {
                self.view.login.message = Some(LoginMessage::Locked);
                self.notify(Toast::warning(
                    "Vault locked",
                    "Too many failed attempts. Try again in 30 seconds.",
                ));
                self.schedule_lockout_expiry();
            }
        }
    }

    pub(crate) fn schedule_lockout_expiry(&mut self) {
        if self.navigator.is_pending(TimerKind::LockoutExpiry) {
            return;
        }
        if let Some(remaining) = self.access.lock_remaining(self.clock) {
            self.navigator
                .schedule(TimerKind::LockoutExpiry, self.clock, remaining);
        }
    }
}
