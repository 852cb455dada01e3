//! Settings page: password change, lock preferences, backups and wipe.

use chrono::Utc;
use tracing::{info, warn};

use calcvault_config::{expand_path, persist_high_contrast_at};
use calcvault_core::{CredentialError, ImportError, Toast, import_file, write_backup};
use calcvault_types::{Intent, PASSWORD_MIN_LEN, PasswordChangeError, Screen};

use super::App;
use crate::ui::{DraftInput, PasswordForm, SettingsItem, SettingsPanel};

impl App {
    /// Run the highlighted settings entry.
    pub(crate) fn settings_activate(&mut self) {
        match self.view.settings.selected_item() {
            SettingsItem::ChangePassword => {
                self.view.settings.panel = SettingsPanel::ChangePassword(PasswordForm::default());
            }
            SettingsItem::AutoLock => self.toggle_auto_lock(),
            SettingsItem::LockTime => self.cycle_lock_time(),
            SettingsItem::HighContrast => self.toggle_high_contrast(),
            SettingsItem::ExportBackup => self.export_backup(),
            SettingsItem::ImportBackup => {
                self.view.settings.panel = SettingsPanel::ImportPath(DraftInput::default());
            }
            SettingsItem::WipeData => self.view.settings.panel = SettingsPanel::ConfirmWipe,
            SettingsItem::Logout => self.logout(),
        }
    }

    pub(crate) fn settings_close_panel(&mut self) {
        self.view.settings.panel = SettingsPanel::Menu;
    }

    // ------------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------------

    pub fn toggle_auto_lock(&mut self) {
        let mut prefs = self.credentials.lock_preferences();
        prefs.auto_lock = !prefs.auto_lock;
        if let Err(err) = self.credentials.set_lock_preferences(prefs) {
            warn!("Saving lock preferences failed: {err}");
            self.notify(Toast::error("Error", "Could not save the preference"));
            return;
        }
        let toast = if prefs.auto_lock {
            Toast::info(
                "Auto-lock enabled",
                format!(
                    "The vault will lock automatically after {} minutes",
                    prefs.lock_time.minutes()
                ),
            )
        } else {
            Toast::info("Auto-lock disabled", "Automatic locking turned off")
        };
        self.notify(toast);
    }

    pub fn cycle_lock_time(&mut self) {
        let mut prefs = self.credentials.lock_preferences();
        prefs.lock_time = prefs.lock_time.next();
        if let Err(err) = self.credentials.set_lock_preferences(prefs) {
            warn!("Saving lock preferences failed: {err}");
            self.notify(Toast::error("Error", "Could not save the preference"));
        }
    }

    /// Flip high contrast for this session and write it to the config file, if any.
    pub fn toggle_high_contrast(&mut self) {
        let enabled = !self.options.ui_options.high_contrast;
        self.options.ui_options.high_contrast = enabled;
        if let Some(path) = self.options.config_path.as_deref()
            && let Err(err) = persist_high_contrast_at(path, enabled)
        {
            warn!("Persisting high contrast failed: {err}");
            self.notify(Toast::warning(
                "Not saved",
                "High contrast applies to this session only",
            ));
        }
    }

    // ------------------------------------------------------------------------
    // Password change
    // ------------------------------------------------------------------------

    fn password_form_mut(&mut self) -> Option<&mut PasswordForm> {
        match &mut self.view.settings.panel {
            SettingsPanel::ChangePassword(form) => Some(form),
            _ => None,
        }
    }

    pub(crate) fn password_form_key(&mut self, key: char) {
        if let Some(form) = self.password_form_mut() {
            form.active_pad().push(key);
        }
    }

    pub(crate) fn password_form_backspace(&mut self) {
        if let Some(form) = self.password_form_mut() {
            form.active_pad().pop();
        }
    }

    pub fn password_form_next_field(&mut self) {
        if let Some(form) = self.password_form_mut() {
            form.next_field();
        }
    }

    pub fn password_form_toggle_reveal(&mut self) {
        if let Some(form) = self.password_form_mut() {
            form.reveal = !form.reveal;
        }
    }

    /// Apply the change. Any failure clears the form and keeps it open.
    pub(crate) fn password_form_submit(&mut self) {
        let Some(form) = self.password_form_mut() else {
            return;
        };
        let current = form.current.take();
        let next = form.next.take();
        let confirm = form.confirm.take();
        *form = PasswordForm {
            reveal: form.reveal,
            ..PasswordForm::default()
        };

        match self.credentials.change_password(&current, &next, &confirm) {
            Ok(()) => {
                self.view.settings.panel = SettingsPanel::Menu;
                self.notify(Toast::success("Success", "Password changed successfully"));
            }
            Err(err) => {
                warn!("Password change rejected: {err}");
                self.notify(Toast::error("Error", password_change_message(&err)));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Backups
    // ------------------------------------------------------------------------

    pub fn export_backup(&mut self) {
        match write_backup(&self.credentials, &self.options.backup_dir, Utc::now()) {
            Ok(path) => self.notify(Toast::success(
                "Exported",
                format!("Vault data exported to {}", path.display()),
            )),
            Err(err) => {
                warn!("Export failed: {err}");
                self.notify(Toast::error("Error", "Failed to export vault data"));
            }
        }
    }

    pub(crate) fn import_submit(&mut self) {
        let raw = match &mut self.view.settings.panel {
            SettingsPanel::ImportPath(path) => path.take_text(),
            _ => return,
        };
        self.view.settings.panel = SettingsPanel::Menu;
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        match import_file(&mut self.credentials, &expand_path(raw)) {
            Ok(()) => self.notify(Toast::success(
                "Imported",
                "Vault data imported successfully",
            )),
            Err(err) => {
                warn!("Import failed: {err}");
                let body = match err {
                    ImportError::Read { .. } | ImportError::Parse(_) => {
                        "Failed to read the backup file".to_string()
                    }
                    other => other.to_string(),
                };
                self.notify(Toast::error("Error", body));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Wipe
    // ------------------------------------------------------------------------

    /// Answer the delete-everything prompt.
    pub fn confirm_wipe(&mut self, confirmed: bool) {
        if !matches!(self.view.settings.panel, SettingsPanel::ConfirmWipe) {
            return;
        }
        self.view.settings.panel = SettingsPanel::Menu;
        if !confirmed {
            return;
        }

        if let Err(err) = self.credentials.wipe() {
            warn!("Wipe failed: {err}");
            self.notify(Toast::error("Error", "Could not delete the vault data"));
            return;
        }
        self.files.clear();
        self.gallery.clear();
        self.notes.clear();
        self.access.reset();
        self.calculator.clear();
        self.calculator.clear_history();
        info!("Vault wiped, returning to setup");
        self.notify(Toast::success("Deleted", "All data deleted successfully"));
        if self.screen() == Screen::Settings {
            self.dispatch(Intent::DataWiped);
        }
    }
}

fn password_change_message(err: &CredentialError) -> String {
    match err {
        CredentialError::Change(PasswordChangeError::WrongCurrent) => {
            "Current password is incorrect".to_string()
        }
        CredentialError::Change(PasswordChangeError::TooShort) => {
            format!("New password must be at least {PASSWORD_MIN_LEN} digits")
        }
        CredentialError::Change(PasswordChangeError::Mismatch) => {
            "New passwords do not match".to_string()
        }
        other => other.to_string(),
    }
}
