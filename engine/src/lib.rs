//! Session engine for calcvault - screen state machine and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies.
//! Renderers read [`ViewModel`]s and feed input back through `App` methods.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod app;
mod ui;

pub use app::{App, AppOptions};
pub use ui::{
    BrowserMode, BrowserState, CalculatorView, DashboardItem, DashboardView, DraftInput,
    EditorField, FilesView, Focus, GalleryView, ListControls, LoginMessage, LoginState, LoginView,
    NoteEditor, NotesState, NotesView, PasswordField, PasswordForm, PinPad, SettingsItem,
    SettingsPanel, SettingsState, SettingsView, SetupStage, SetupState, SetupView, ViewModel,
    ViewState,
};

// Re-exported so renderers and the binary need only this crate for domain types.
pub use calcvault_core::{Toast, ToastLevel};
pub use calcvault_types::{
    FileEntry, ImageEntry, Intent, LockPreferences, LockTime, Note, Operator, Record, RecordId,
    Screen, format_size, ui::UiOptions,
};
