//! The session state machine.
//!
//! `App` owns every core component and is the only router: screens never
//! talk to each other, they call into `App`, which turns input into typed
//! intents and side effects. Time only advances through [`App::tick_at`].

mod calculator;
mod gate;
mod settings;
mod vault;
mod view_model;


use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use calcvault_config::VaultConfig;
use calcvault_core::{
    AccessController, Calculator, CredentialStore, FileManager, Gallery, Navigator, NoteBook,
    NotificationSink, ScheduledTask, TimerKind, Toast, ToastQueue, Transition,
    determine_initial_screen,
};
use calcvault_types::{Intent, Screen, ui::UiOptions};

use crate::ui::{Focus, LoginMessage, ViewState};

/// Session-wide settings resolved by the caller.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub ui_options: UiOptions,
    /// Directory receiving exported backups.
    pub backup_dir: PathBuf,
    /// Config file updated when UI preferences change. `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
}

impl AppOptions {
    #[must_use]
    pub fn from_config(config: &VaultConfig) -> Self {
        Self {
            ui_options: config.ui_options(),
            backup_dir: config.backup_dir(),
            config_path: VaultConfig::path(),
        }
    }
}

pub struct App {
    navigator: Navigator,
    credentials: CredentialStore,
    calculator: Calculator,
    /// Lives for the whole session so leaving the login screen can't lift a lockout.
    access: AccessController,
    files: FileManager,
    gallery: Gallery,
    notes: NoteBook,
    toasts: ToastQueue,
    view: ViewState,
    options: AppOptions,
    /// Session clock, advanced by `tick_at`.
    clock: Instant,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(credentials: CredentialStore, options: AppOptions) -> Self {
        let initial = determine_initial_screen(&credentials);
        info!(%initial, "Session started");
        Self {
            navigator: Navigator::new(initial),
            credentials,
            calculator: Calculator::new(),
            access: AccessController::new(),
            files: FileManager::files(),
            gallery: Gallery::gallery(),
            notes: NoteBook::notes(),
            toasts: ToastQueue::new(),
            view: ViewState::default(),
            options,
            clock: Instant::now(),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.view.focus(self.screen())
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options.ui_options
    }

    #[must_use]
    pub fn clock(&self) -> Instant {
        self.clock
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    #[must_use]
    pub fn access(&self) -> &AccessController {
        &self.access
    }

    #[must_use]
    pub fn files(&self) -> &FileManager {
        &self.files
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn notes(&self) -> &NoteBook {
        &self.notes
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Visible toasts, oldest first.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.visible()
    }

    /// Route an intent. Entering a screen resets its interaction state.
    pub fn dispatch(&mut self, intent: Intent) -> Transition {
        let transition = self.navigator.dispatch(intent);
        if transition.changed() {
            self.enter(transition.to);
        }
        transition
    }

    /// Leave the vault (or the login prompt) for the calculator.
    pub fn logout(&mut self) {
        let transition = self.dispatch(Intent::Logout);
        if transition.from.is_unlocked() {
            info!("Vault locked by user");
            self.notify(Toast::info("Vault locked", "Your data is safely protected"));
        }
    }

    /// Return from a vault subpage to the dashboard.
    pub fn go_back(&mut self) {
        if self.screen().is_vault_subpage() {
            self.dispatch(Intent::Back);
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the session clock and fire due timers.
    pub fn tick_at(&mut self, now: Instant) {
        if now > self.clock {
            self.clock = now;
        }
        self.toasts.expire(self.clock);
        for task in self.navigator.take_due(self.clock) {
            self.fire(task);
        }
    }

    /// Earliest pending timer, for callers that sleep between frames.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.navigator.next_due()
    }

    // ------------------------------------------------------------------------
    // Focus-routed editing
    // ------------------------------------------------------------------------

    /// Type a character into whatever currently has focus.
    pub fn insert_char(&mut self, c: char) {
        match self.focus() {
            Focus::Keypad => match self.screen() {
                Screen::InitialSetup => self.setup_key(c),
                _ => self.login_key(c),
            },
            Focus::Search => self.search_insert(c),
            Focus::PathPrompt => self.path_insert(c),
            Focus::NoteEditor => self.editor_insert(c),
            Focus::PasswordForm => self.password_form_key(c),
            Focus::Calculator
            | Focus::Menu
            | Focus::List
            | Focus::ImageDetail
            | Focus::ConfirmWipe
            | Focus::Placeholder => {}
        }
    }

    /// Backspace in whatever currently has focus.
    pub fn delete_char(&mut self) {
        match self.focus() {
            Focus::Keypad => match self.screen() {
                Screen::InitialSetup => self.setup_backspace(),
                _ => self.login_backspace(),
            },
            Focus::Search => self.search_backspace(),
            Focus::PathPrompt => self.path_backspace(),
            Focus::NoteEditor => self.editor_backspace(),
            Focus::PasswordForm => self.password_form_backspace(),
            Focus::Calculator
            | Focus::Menu
            | Focus::List
            | Focus::ImageDetail
            | Focus::ConfirmWipe
            | Focus::Placeholder => {}
        }
    }

    /// Enter/confirm for the focused element.
    pub fn submit(&mut self) {
        match self.focus() {
            Focus::Calculator => {
                self.calc_evaluate();
            }
            Focus::Keypad => match self.screen() {
                Screen::InitialSetup => self.setup_submit(),
                _ => self.login_submit(),
            },
            Focus::Menu => match self.screen() {
                Screen::Settings => self.settings_activate(),
                _ => self.dashboard_open(),
            },
            Focus::List => self.open_selected(),
            Focus::Search => self.search_finish(),
            Focus::PathPrompt => match self.screen() {
                Screen::Settings => self.import_submit(),
                _ => self.add_submit(),
            },
            Focus::NoteEditor => self.editor_enter(),
            Focus::PasswordForm => self.password_form_submit(),
            Focus::ImageDetail => self.close_detail(),
            Focus::ConfirmWipe | Focus::Placeholder => {}
        }
    }

    /// Escape for the focused element: close the innermost panel, or go back.
    pub fn cancel(&mut self) {
        match self.focus() {
            Focus::Calculator => self.calc_clear(),
            Focus::Keypad => match self.screen() {
                Screen::InitialSetup => self.setup_cancel(),
                _ => self.login_back(),
            },
            Focus::Menu => {
                if self.screen() == Screen::Settings {
                    self.go_back();
                }
            }
            Focus::Search => self.search_cancel(),
            Focus::PathPrompt => match self.screen() {
                Screen::Settings => self.settings_close_panel(),
                _ => self.add_cancel(),
            },
            Focus::NoteEditor => self.editor_cancel(),
            Focus::PasswordForm | Focus::ConfirmWipe => self.settings_close_panel(),
            Focus::ImageDetail => self.close_detail(),
            Focus::List | Focus::Placeholder => self.go_back(),
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn enter(&mut self, screen: Screen) {
        self.view.enter(screen);
        if screen == Screen::VaultLogin && self.access.is_locked(self.clock) {
            self.view.login.message = Some(LoginMessage::Locked);
            self.schedule_lockout_expiry();
        }
    }

    fn fire(&mut self, task: ScheduledTask) {
        debug!(kind = ?task.kind, owner = %task.owner, "Timer fired");
        match task.kind {
            TimerKind::SecretAccess => {
                self.notify(Toast::info(
                    "Secret access detected",
                    "Redirecting to the secure vault...",
                ));
                self.dispatch(Intent::SecretDetected);
            }
            TimerKind::LockoutExpiry => {
                self.access.expire_if_due(self.clock);
                if !self.access.is_locked(self.clock) {
                    self.view.login.message = None;
                    self.notify(Toast::info(
                        "Vault unlocked",
                        "You can enter your access code again",
                    ));
                }
            }
        }
    }

    pub(crate) fn notify(&mut self, toast: Toast) {
        self.toasts.notify(toast);
    }
}
