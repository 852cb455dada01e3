//! Read-only view models handed to the renderer, one variant per screen.

use std::path::Path;
use std::time::Duration;

use calcvault_types::{FileEntry, ImageEntry, LockPreferences, Note, Operator, Screen};

use super::input::DraftInput;
use super::view_state::{
    BrowserMode, Focus, LoginMessage, NoteEditor, SettingsItem, SettingsPanel, SetupStage,
};

#[derive(Debug)]
pub enum ViewModel<'a> {
    InitialSetup(SetupView<'a>),
    Calculator(CalculatorView<'a>),
    VaultLogin(LoginView),
    VaultDashboard(DashboardView),
    Files(FilesView<'a>),
    Gallery(GalleryView<'a>),
    Notes(NotesView<'a>),
    Trash,
    Settings(SettingsView<'a>),
}

impl ViewModel<'_> {
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Self::InitialSetup(_) => Screen::InitialSetup,
            Self::Calculator(_) => Screen::Calculator,
            Self::VaultLogin(_) => Screen::VaultLogin,
            Self::VaultDashboard(_) => Screen::VaultDashboard,
            Self::Files(_) => Screen::Files,
            Self::Gallery(_) => Screen::Gallery,
            Self::Notes(_) => Screen::Notes,
            Self::Trash => Screen::Trash,
            Self::Settings(_) => Screen::Settings,
        }
    }
}

#[derive(Debug)]
pub struct SetupView<'a> {
    pub stage: SetupStage,
    pub password_len: usize,
    pub confirm_len: usize,
    pub error: Option<&'a str>,
}

#[derive(Debug)]
pub struct CalculatorView<'a> {
    pub display: &'a str,
    pub pending: Option<(&'a str, Operator)>,
    pub history: Vec<&'a str>,
    pub show_history: bool,
}

#[derive(Debug)]
pub struct LoginView {
    pub code_len: usize,
    pub message: Option<LoginMessage>,
    /// Time left on an active lockout.
    pub locked_for: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardItem {
    pub screen: Screen,
    pub count: Option<usize>,
}

#[derive(Debug)]
pub struct DashboardView {
    pub items: Vec<DashboardItem>,
    pub selected: usize,
    pub total_bytes: u64,
}

/// Search and import prompt state shared by the list screens.
#[derive(Debug)]
pub struct ListControls<'a> {
    pub mode: BrowserMode,
    pub focus: Focus,
    pub search: &'a DraftInput,
    pub path: &'a DraftInput,
    pub selected: usize,
}

#[derive(Debug)]
pub struct FilesView<'a> {
    pub records: Vec<&'a FileEntry>,
    pub controls: ListControls<'a>,
    pub total_bytes: u64,
}

#[derive(Debug)]
pub struct GalleryView<'a> {
    pub records: Vec<&'a ImageEntry>,
    pub controls: ListControls<'a>,
    pub detail: Option<&'a ImageEntry>,
}

#[derive(Debug)]
pub struct NotesView<'a> {
    pub records: Vec<&'a Note>,
    pub controls: ListControls<'a>,
    pub editor: Option<&'a NoteEditor>,
}

#[derive(Debug)]
pub struct SettingsView<'a> {
    pub items: &'static [SettingsItem],
    pub selected: usize,
    pub panel: &'a SettingsPanel,
    pub lock: LockPreferences,
    pub high_contrast: bool,
    pub backup_dir: &'a Path,
}
