//! Dashboard, content lists, gallery detail and the note editor.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use calcvault_core::{ContentError, Toast, read_import};
use calcvault_config::expand_path;
use calcvault_types::{ImageFormat, Intent, Record, RecordId, Screen, format_size};

use super::App;
use crate::ui::{
    BrowserMode, DraftInput, EditorField, NoteEditor, SettingsItem, SettingsPanel,
};

impl App {
    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let screen = self.screen();
        match screen {
            Screen::VaultDashboard => {
                let last = Screen::VAULT_SUBPAGES.len() - 1;
                self.view.dashboard_selected = (self.view.dashboard_selected + 1).min(last);
            }
            Screen::Settings => {
                let last = SettingsItem::ALL.len() - 1;
                self.view.settings.selected = (self.view.settings.selected + 1).min(last);
            }
            _ => {
                let len = self.visible_len(screen);
                if let Some(browser) = self.view.browser_mut(screen) {
                    browser.select_next(len);
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        let screen = self.screen();
        match screen {
            Screen::VaultDashboard => {
                self.view.dashboard_selected = self.view.dashboard_selected.saturating_sub(1);
            }
            Screen::Settings => {
                self.view.settings.selected = self.view.settings.selected.saturating_sub(1);
            }
            _ => {
                if let Some(browser) = self.view.browser_mut(screen) {
                    browser.select_prev();
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------------

    pub(crate) fn dashboard_open(&mut self) {
        let index = self
            .view
            .dashboard_selected
            .min(Screen::VAULT_SUBPAGES.len() - 1);
        self.open_page(Screen::VAULT_SUBPAGES[index]);
    }

    /// Open a vault page from the dashboard.
    pub fn open_page(&mut self, target: Screen) {
        if self.screen() == Screen::VaultDashboard {
            self.dispatch(Intent::Navigate(target));
        }
    }

    /// Bytes held by every collection.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.total_bytes() + self.gallery.total_bytes() + self.notes.total_bytes()
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    pub fn search_start(&mut self) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.mode = BrowserMode::Search;
            browser.detail = None;
        }
    }

    pub(crate) fn search_insert(&mut self, c: char) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.search.enter_char(c);
            browser.selected = 0;
        }
    }

    pub(crate) fn search_backspace(&mut self) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.search.delete_char();
            browser.selected = 0;
        }
    }

    /// Stop typing and keep the filter.
    pub(crate) fn search_finish(&mut self) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.mode = BrowserMode::Browse;
        }
    }

    /// Stop typing and drop the filter.
    pub(crate) fn search_cancel(&mut self) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.search.clear();
            browser.mode = BrowserMode::Browse;
            browser.selected = 0;
        }
    }

    /// Prompt for a path to import (Files and Gallery).
    pub fn add_start(&mut self) {
        let screen = self.screen();
        if !matches!(screen, Screen::Files | Screen::Gallery) {
            return;
        }
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.path.clear();
            browser.mode = BrowserMode::AddPath;
            browser.detail = None;
        }
    }

    pub(crate) fn path_insert(&mut self, c: char) {
        if let Some(path) = self.path_prompt_mut() {
            path.enter_char(c);
        }
    }

    pub(crate) fn path_backspace(&mut self) {
        if let Some(path) = self.path_prompt_mut() {
            path.delete_char();
        }
    }

    pub(crate) fn add_cancel(&mut self) {
        let screen = self.screen();
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.path.clear();
            browser.mode = BrowserMode::Browse;
        }
    }

    /// Read the prompted file into the current collection.
    pub(crate) fn add_submit(&mut self) {
        let screen = self.screen();
        let Some(browser) = self.view.browser_mut(screen) else {
            return;
        };
        let raw = browser.path.take_text();
        browser.mode = BrowserMode::Browse;
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        let path = expand_path(raw);
        let result = check_gallery_name(screen, &path)
            .and_then(|()| read_import(&path))
            .and_then(|(name, payload)| {
                let now = Utc::now();
                match screen {
                    Screen::Gallery => self
                        .gallery
                        .create(&name, payload, now)
                        .map(|image| (image.name.clone(), image.size())),
                    _ => self
                        .files
                        .create(&name, payload, now)
                        .map(|file| (file.name.clone(), file.size())),
                }
            });

        match result {
            Ok((name, size)) => {
                info!(%screen, size, "Imported file into vault");
                self.notify(Toast::success(
                    "Added",
                    format!("{name} ({})", format_size(size)),
                ));
                let len = self.visible_len(screen);
                if let Some(browser) = self.view.browser_mut(screen) {
                    browser.selected = len.saturating_sub(1);
                }
            }
            Err(err) => {
                warn!(%screen, "Import into vault failed: {err}");
                let title = match err {
                    ContentError::UnsupportedImage { .. } => "Not an image",
                    _ => "Error",
                };
                self.notify(Toast::error(title, err.to_string()));
            }
        }
    }

    /// Delete the highlighted record. Deleting the image being viewed closes it.
    pub fn delete_selected(&mut self) {
        let screen = self.screen();
        let Some(id) = self.selected_id(screen) else {
            return;
        };
        match screen {
            Screen::Files => {
                self.files.delete(id);
            }
            Screen::Gallery => {
                self.gallery.delete(id);
                if self.view.gallery.detail == Some(id) {
                    self.view.gallery.detail = None;
                }
            }
            Screen::Notes => {
                self.notes.delete(id);
                if self.view.notes.editor.as_ref().is_some_and(|e| e.id == id) {
                    self.view.notes.editor = None;
                }
            }
            _ => return,
        }
        let len = self.visible_len(screen);
        if let Some(browser) = self.view.browser_mut(screen) {
            browser.clamp(len);
        }
    }

    /// Gallery: open the image detail. Notes: open the editor.
    pub(crate) fn open_selected(&mut self) {
        let screen = self.screen();
        let Some(id) = self.selected_id(screen) else {
            return;
        };
        match screen {
            Screen::Gallery => self.view.gallery.detail = Some(id),
            Screen::Notes => self.open_editor(id),
            _ => {}
        }
    }

    pub(crate) fn close_detail(&mut self) {
        self.view.gallery.detail = None;
    }

    // ------------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------------

    /// Create an empty note at the top of the list and open it.
    pub fn new_note(&mut self) {
        if self.screen() != Screen::Notes {
            return;
        }
        let id = self.notes.create(Utc::now()).id;
        self.view.notes.browser.search.clear();
        self.view.notes.browser.mode = BrowserMode::Browse;
        self.view.notes.browser.selected = 0;
        self.open_editor(id);
    }

    fn open_editor(&mut self, id: RecordId) {
        let Some(note) = self.notes.get(id) else {
            return;
        };
        self.view.notes.editor = Some(NoteEditor {
            id,
            title: DraftInput::with_text(note.title.clone()),
            content: DraftInput::with_text(note.content.clone()),
            field: EditorField::Title,
        });
    }

    pub(crate) fn editor_insert(&mut self, c: char) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            editor.active_mut().enter_char(c);
        }
    }

    pub(crate) fn editor_backspace(&mut self) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            editor.active_mut().delete_char();
        }
    }

    /// Enter moves from the title to the body; in the body it starts a new line.
    pub(crate) fn editor_enter(&mut self) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            match editor.field {
                EditorField::Title => editor.toggle_field(),
                EditorField::Content => editor.content.enter_newline(),
            }
        }
    }

    pub fn editor_switch_field(&mut self) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            editor.toggle_field();
        }
    }

    pub fn editor_cursor_left(&mut self) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            editor.active_mut().move_cursor_left();
        }
    }

    pub fn editor_cursor_right(&mut self) {
        if let Some(editor) = self.view.notes.editor.as_mut() {
            editor.active_mut().move_cursor_right();
        }
    }

    /// Write the working copy back and close the editor.
    pub fn editor_save(&mut self) {
        let Some(editor) = self.view.notes.editor.take() else {
            return;
        };
        match self.notes.update(
            editor.id,
            editor.title.text(),
            editor.content.text(),
            Utc::now(),
        ) {
            Ok(_) => self.notify(Toast::success("Saved", "Note saved")),
            Err(err) => {
                warn!("Saving note failed: {err}");
                self.notify(Toast::error("Error", err.to_string()));
            }
        }
    }

    /// Close the editor, discarding unsaved edits.
    pub(crate) fn editor_cancel(&mut self) {
        self.view.notes.editor = None;
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn filter_text(&self, screen: Screen) -> &str {
        self.view
            .browser(screen)
            .map_or("", |browser| browser.search.text())
    }

    pub(crate) fn visible_len(&self, screen: Screen) -> usize {
        let filter = self.filter_text(screen);
        match screen {
            Screen::Files => self.files.list(filter).len(),
            Screen::Gallery => self.gallery.list(filter).len(),
            Screen::Notes => self.notes.list(filter).len(),
            _ => 0,
        }
    }

    fn selected_id(&self, screen: Screen) -> Option<RecordId> {
        let filter = self.filter_text(screen);
        let selected = self.view.browser(screen)?.selected;
        match screen {
            Screen::Files => self.files.list(filter).get(selected).map(|r| r.id()),
            Screen::Gallery => self.gallery.list(filter).get(selected).map(|r| r.id()),
            Screen::Notes => self.notes.list(filter).get(selected).map(|r| r.id()),
            _ => None,
        }
    }

    fn path_prompt_mut(&mut self) -> Option<&mut DraftInput> {
        let screen = self.screen();
        if screen == Screen::Settings {
            return match &mut self.view.settings.panel {
                SettingsPanel::ImportPath(path) => Some(path),
                _ => None,
            };
        }
        self.view.browser_mut(screen).map(|browser| &mut browser.path)
    }
}

/// Gallery imports are checked by name before any bytes are read.
fn check_gallery_name(screen: Screen, path: &Path) -> Result<(), ContentError> {
    if screen != Screen::Gallery {
        return Ok(());
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if ImageFormat::from_name(&name).is_some() {
        Ok(())
    } else {
        Err(ContentError::UnsupportedImage { name })
    }
}
