//! Shared test utilities and fixtures
//!
//! Every helper builds a session on a real `JsonFileStore` inside a temp dir,
//! so reopening the same directory behaves like restarting the binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use calcvault_core::{CredentialStore, JsonFileStore};
use calcvault_engine::{App, AppOptions, UiOptions};

pub const PASSWORD: &str = "1234";

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("vault.json")
}

pub fn backup_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("backups")
}

/// Start a session against the store in `dir`, as a fresh process would.
pub fn launch(dir: &TempDir) -> App {
    let store = JsonFileStore::open(store_path(dir)).expect("open store");
    App::new(
        CredentialStore::new(Box::new(store)),
        AppOptions {
            ui_options: UiOptions::default(),
            backup_dir: backup_dir(dir),
            config_path: Some(dir.path().join("config.toml")),
        },
    )
}

pub fn press(app: &mut App, code: KeyCode) {
    calcvault_tui::apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

pub fn press_ctrl(app: &mut App, c: char) {
    calcvault_tui::apply_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

pub fn type_keys(app: &mut App, keys: &str) {
    for c in keys.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Complete first-run setup with [`PASSWORD`].
pub fn complete_setup(app: &mut App) {
    type_keys(app, PASSWORD);
    press(app, KeyCode::Enter);
    type_keys(app, PASSWORD);
    press(app, KeyCode::Enter);
}

/// Type `7 * 191 =` and let the redirect timer fire.
pub fn trigger_secret(app: &mut App) {
    type_keys(app, "7*191");
    press(app, KeyCode::Enter);
    let deadline = app.clock() + Duration::from_secs(1);
    app.tick_at(deadline);
}

pub fn unlock(app: &mut App) {
    trigger_secret(app);
    type_keys(app, PASSWORD);
    press(app, KeyCode::Enter);
}

pub fn advance(app: &mut App, by: Duration) {
    let next = app.clock() + by;
    app.tick_at(next);
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

pub fn toast_titles(app: &App) -> Vec<String> {
    app.toasts().map(|t| t.title.clone()).collect()
}
