//! Per-screen interaction state owned by the session.
//!
//! Each screen's state is reset when the screen is entered, so nothing typed
//! on one visit leaks into the next.

use calcvault_types::{RecordId, Screen};

use super::input::{DraftInput, PinPad};

// ============================================================================
// Setup & Login
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupStage {
    #[default]
    Enter,
    Confirm,
}

#[derive(Debug, Clone, Default)]
pub struct SetupState {
    pub stage: SetupStage,
    pub password: PinPad,
    pub confirm: PinPad,
    pub error: Option<String>,
}

impl SetupState {
    pub(crate) fn active_pad(&mut self) -> &mut PinPad {
        match self.stage {
            SetupStage::Enter => &mut self.password,
            SetupStage::Confirm => &mut self.confirm,
        }
    }
}

/// Feedback line under the login keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMessage {
    Rejected { remaining: u8 },
    Locked,
    StillLocked,
}

impl LoginMessage {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Rejected { remaining } => {
                format!("Incorrect password. {remaining} attempts remaining.")
            }
            Self::Locked => "Vault locked due to multiple failed attempts".to_string(),
            Self::StillLocked => "Too many failed attempts. Please wait.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub code: PinPad,
    pub message: Option<LoginMessage>,
}

// ============================================================================
// Vault browsing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserMode {
    #[default]
    Browse,
    /// Typing into the search box.
    Search,
    /// Typing a path to import from disk.
    AddPath,
}

/// List navigation shared by Files, Gallery and Notes.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub mode: BrowserMode,
    pub search: DraftInput,
    pub path: DraftInput,
    pub selected: usize,
    /// Gallery detail view.
    pub detail: Option<RecordId>,
}

impl BrowserState {
    pub(crate) fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(crate) fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub(crate) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Title,
    Content,
}

/// Working copy of a note; nothing reaches the note book until saved.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    pub id: RecordId,
    pub title: DraftInput,
    pub content: DraftInput,
    pub field: EditorField,
}

impl NoteEditor {
    pub(crate) fn active_mut(&mut self) -> &mut DraftInput {
        match self.field {
            EditorField::Title => &mut self.title,
            EditorField::Content => &mut self.content,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.field = match self.field {
            EditorField::Title => EditorField::Content,
            EditorField::Content => EditorField::Title,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotesState {
    pub browser: BrowserState,
    pub editor: Option<NoteEditor>,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    ChangePassword,
    AutoLock,
    LockTime,
    HighContrast,
    ExportBackup,
    ImportBackup,
    WipeData,
    Logout,
}

impl SettingsItem {
    pub const ALL: [Self; 8] = [
        Self::ChangePassword,
        Self::AutoLock,
        Self::LockTime,
        Self::HighContrast,
        Self::ExportBackup,
        Self::ImportBackup,
        Self::WipeData,
        Self::Logout,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChangePassword => "Change password",
            Self::AutoLock => "Auto-lock",
            Self::LockTime => "Lock after",
            Self::HighContrast => "High contrast",
            Self::ExportBackup => "Export backup",
            Self::ImportBackup => "Import backup",
            Self::WipeData => "Delete all data",
            Self::Logout => "Lock vault",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordField {
    #[default]
    Current,
    New,
    Confirm,
}

#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub current: PinPad,
    pub next: PinPad,
    pub confirm: PinPad,
    pub field: PasswordField,
    /// Show digits instead of masks.
    pub reveal: bool,
}

impl PasswordForm {
    pub(crate) fn active_pad(&mut self) -> &mut PinPad {
        match self.field {
            PasswordField::Current => &mut self.current,
            PasswordField::New => &mut self.next,
            PasswordField::Confirm => &mut self.confirm,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.field = match self.field {
            PasswordField::Current => PasswordField::New,
            PasswordField::New => PasswordField::Confirm,
            PasswordField::Confirm => PasswordField::Current,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub enum SettingsPanel {
    #[default]
    Menu,
    ChangePassword(PasswordForm),
    ImportPath(DraftInput),
    ConfirmWipe,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub selected: usize,
    pub panel: SettingsPanel,
}

impl SettingsState {
    #[must_use]
    pub fn selected_item(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected.min(SettingsItem::ALL.len() - 1)]
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// What keyboard input currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calculator,
    Keypad,
    Menu,
    List,
    Search,
    PathPrompt,
    ImageDetail,
    NoteEditor,
    PasswordForm,
    ConfirmWipe,
    Placeholder,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub show_history: bool,
    pub setup: SetupState,
    pub login: LoginState,
    pub dashboard_selected: usize,
    pub files: BrowserState,
    pub gallery: BrowserState,
    pub notes: NotesState,
    pub settings: SettingsState,
}

impl ViewState {
    /// Reset the state of a screen being entered.
    pub(crate) fn enter(&mut self, screen: Screen) {
        match screen {
            Screen::InitialSetup => self.setup = SetupState::default(),
            Screen::Calculator => self.show_history = false,
            Screen::VaultLogin => self.login = LoginState::default(),
            Screen::VaultDashboard | Screen::Trash => {}
            Screen::Files => self.files = BrowserState::default(),
            Screen::Gallery => self.gallery = BrowserState::default(),
            Screen::Notes => self.notes = NotesState::default(),
            Screen::Settings => self.settings = SettingsState::default(),
        }
    }

    pub(crate) fn browser_mut(&mut self, screen: Screen) -> Option<&mut BrowserState> {
        match screen {
            Screen::Files => Some(&mut self.files),
            Screen::Gallery => Some(&mut self.gallery),
            Screen::Notes => Some(&mut self.notes.browser),
            _ => None,
        }
    }

    #[must_use]
    pub fn browser(&self, screen: Screen) -> Option<&BrowserState> {
        match screen {
            Screen::Files => Some(&self.files),
            Screen::Gallery => Some(&self.gallery),
            Screen::Notes => Some(&self.notes.browser),
            _ => None,
        }
    }

    #[must_use]
    pub fn focus(&self, screen: Screen) -> Focus {
        match screen {
            Screen::Calculator => Focus::Calculator,
            Screen::InitialSetup | Screen::VaultLogin => Focus::Keypad,
            Screen::VaultDashboard => Focus::Menu,
            Screen::Trash => Focus::Placeholder,
            Screen::Settings => match self.settings.panel {
                SettingsPanel::Menu => Focus::Menu,
                SettingsPanel::ChangePassword(_) => Focus::PasswordForm,
                SettingsPanel::ImportPath(_) => Focus::PathPrompt,
                SettingsPanel::ConfirmWipe => Focus::ConfirmWipe,
            },
            Screen::Notes if self.notes.editor.is_some() => Focus::NoteEditor,
            Screen::Files | Screen::Gallery | Screen::Notes => {
                let Some(browser) = self.browser(screen) else {
                    return Focus::List;
                };
                match browser.mode {
                    BrowserMode::Search => Focus::Search,
                    BrowserMode::AddPath => Focus::PathPrompt,
                    BrowserMode::Browse if browser.detail.is_some() => Focus::ImageDetail,
                    BrowserMode::Browse => Focus::List,
                }
            }
        }
    }
}
