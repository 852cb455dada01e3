//! UI-facing types for the engine: input buffers, per-screen state, view models.

mod input;
mod view;
mod view_state;

pub use input::{DraftInput, PinPad};
pub use view::{
    CalculatorView, DashboardItem, DashboardView, FilesView, GalleryView, ListControls,
    LoginView, NotesView, SettingsView, SetupView, ViewModel,
};
pub use view_state::{
    BrowserMode, BrowserState, EditorField, Focus, LoginMessage, LoginState, NoteEditor,
    NotesState, PasswordField, PasswordForm, SettingsItem, SettingsPanel, SettingsState,
    SetupStage, SetupState, ViewState,
};
