//! Builds the renderer's read-only view of the current screen.

use calcvault_types::Screen;

use super::App;
use crate::ui::{
    BrowserState, CalculatorView, DashboardItem, DashboardView, FilesView, GalleryView,
    ListControls, LoginView, NotesView, SettingsItem, SettingsView, SetupView, ViewModel,
};

impl App {
    #[must_use]
    pub fn view_model(&self) -> ViewModel<'_> {
        match self.screen() {
            Screen::InitialSetup => {
                let setup = &self.view.setup;
                ViewModel::InitialSetup(SetupView {
                    stage: setup.stage,
                    password_len: setup.password.len(),
                    confirm_len: setup.confirm.len(),
                    error: setup.error.as_deref(),
                })
            }
            Screen::Calculator => ViewModel::Calculator(CalculatorView {
                display: self.calculator.display(),
                pending: self
                    .calculator
                    .pending_value()
                    .zip(self.calculator.pending_operator()),
                history: self.calculator.history().collect(),
                show_history: self.view.show_history,
            }),
            Screen::VaultLogin => ViewModel::VaultLogin(LoginView {
                code_len: self.view.login.code.len(),
                message: self.view.login.message,
                locked_for: self.access.lock_remaining(self.clock),
            }),
            Screen::VaultDashboard => ViewModel::VaultDashboard(DashboardView {
                items: Screen::VAULT_SUBPAGES
                    .into_iter()
                    .map(|screen| DashboardItem {
                        screen,
                        count: match screen {
                            Screen::Files => Some(self.files.len()),
                            Screen::Gallery => Some(self.gallery.len()),
                            Screen::Notes => Some(self.notes.len()),
                            _ => None,
                        },
                    })
                    .collect(),
                selected: self.view.dashboard_selected,
                total_bytes: self.total_bytes(),
            }),
            Screen::Files => {
                let browser = &self.view.files;
                ViewModel::Files(FilesView {
                    records: self.files.list(browser.search.text()),
                    controls: self.list_controls(Screen::Files, browser),
                    total_bytes: self.files.total_bytes(),
                })
            }
            Screen::Gallery => {
                let browser = &self.view.gallery;
                ViewModel::Gallery(GalleryView {
                    records: self.gallery.list(browser.search.text()),
                    controls: self.list_controls(Screen::Gallery, browser),
                    detail: browser.detail.and_then(|id| self.gallery.get(id)),
                })
            }
            Screen::Notes => {
                let browser = &self.view.notes.browser;
                ViewModel::Notes(NotesView {
                    records: self.notes.list(browser.search.text()),
                    controls: self.list_controls(Screen::Notes, browser),
                    editor: self.view.notes.editor.as_ref(),
                })
            }
            Screen::Trash => ViewModel::Trash,
            Screen::Settings => ViewModel::Settings(SettingsView {
                items: &SettingsItem::ALL,
                selected: self.view.settings.selected,
                panel: &self.view.settings.panel,
                lock: self.credentials.lock_preferences(),
                high_contrast: self.options.ui_options.high_contrast,
                backup_dir: &self.options.backup_dir,
            }),
        }
    }

    fn list_controls<'a>(&self, screen: Screen, browser: &'a BrowserState) -> ListControls<'a> {
        ListControls {
            mode: browser.mode,
            focus: self.view.focus(screen),
            search: &browser.search,
            path: &browser.path,
            selected: browser.selected,
        }
    }
}
