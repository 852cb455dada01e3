//! Restart behavior against the on-disk store.

use std::fs;

use crossterm::event::KeyCode;
use tempfile::tempdir;

use calcvault_config::VaultConfig;
use calcvault_engine::{App, Focus, LockTime, Screen, SettingsItem};

use crate::common::{
    PASSWORD, backup_dir, complete_setup, launch, press, store_path, toast_titles,
    trigger_secret, type_keys, unlock, write_file,
};

fn open_settings(app: &mut App) {
    for _ in 0..4 {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Settings);
}

fn select(app: &mut App, item: SettingsItem) {
    while app.view_state().settings.selected_item() != item {
        press(app, KeyCode::Down);
    }
}

#[test]
fn setup_survives_restart() {
    let dir = tempdir().expect("tempdir");

    let mut first = launch(&dir);
    assert_eq!(first.screen(), Screen::InitialSetup);
    complete_setup(&mut first);
    assert_eq!(first.screen(), Screen::Calculator);
    drop(first);

    let stored = fs::read_to_string(store_path(&dir)).expect("store written");
    assert!(stored.contains("\"vault_setup_complete\""));

    let mut second = launch(&dir);
    assert_eq!(second.screen(), Screen::Calculator);
    unlock(&mut second);
    assert_eq!(second.screen(), Screen::VaultDashboard);
}

#[test]
fn corrupt_store_falls_back_to_setup() {
    let dir = tempdir().expect("tempdir");
    fs::write(store_path(&dir), "{ not json").expect("write");

    let mut app = launch(&dir);
    assert_eq!(app.screen(), Screen::InitialSetup);

    complete_setup(&mut app);
    let reopened = launch(&dir);
    assert_eq!(reopened.screen(), Screen::Calculator);
}

#[test]
fn missing_setup_flag_means_setup_again() {
    let dir = tempdir().expect("tempdir");
    fs::write(store_path(&dir), r#"{"vault_password":"1234"}"#).expect("write");

    let app = launch(&dir);
    assert_eq!(app.screen(), Screen::InitialSetup);
}

#[test]
fn lock_preferences_persist_across_restart() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);
    open_settings(&mut app);

    select(&mut app, SettingsItem::AutoLock);
    press(&mut app, KeyCode::Enter);
    select(&mut app, SettingsItem::LockTime);
    press(&mut app, KeyCode::Enter);
    drop(app);

    let reopened = launch(&dir);
    let prefs = reopened.credentials().lock_preferences();
    assert!(!prefs.auto_lock);
    assert_eq!(prefs.lock_time, LockTime::TenMinutes);
}

#[test]
fn password_change_persists_across_restart() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);
    open_settings(&mut app);

    select(&mut app, SettingsItem::ChangePassword);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus(), Focus::PasswordForm);
    type_keys(&mut app, PASSWORD);
    press(&mut app, KeyCode::Tab);
    type_keys(&mut app, "98765");
    press(&mut app, KeyCode::Tab);
    type_keys(&mut app, "98765");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus(), Focus::Menu);
    drop(app);

    let mut reopened = launch(&dir);
    trigger_secret(&mut reopened);
    type_keys(&mut reopened, PASSWORD);
    press(&mut reopened, KeyCode::Enter);
    assert_eq!(reopened.screen(), Screen::VaultLogin);
    type_keys(&mut reopened, "98765");
    press(&mut reopened, KeyCode::Enter);
    assert_eq!(reopened.screen(), Screen::VaultDashboard);
}

#[test]
fn wipe_clears_the_store_on_disk() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);
    open_settings(&mut app);

    select(&mut app, SettingsItem::WipeData);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus(), Focus::ConfirmWipe);
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.screen(), Screen::InitialSetup);
    drop(app);

    let reopened = launch(&dir);
    assert_eq!(reopened.screen(), Screen::InitialSetup);
    assert!(reopened.credentials().password().is_none());
}

#[test]
fn exported_backup_restores_into_fresh_vault() {
    let source_dir = tempdir().expect("tempdir");
    let mut source = launch(&source_dir);
    complete_setup(&mut source);
    unlock(&mut source);
    open_settings(&mut source);
    select(&mut source, SettingsItem::ExportBackup);
    press(&mut source, KeyCode::Enter);
    assert!(toast_titles(&source).contains(&"Exported".to_string()));

    let backup = fs::read_dir(backup_dir(&source_dir))
        .expect("backup dir")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .next()
        .expect("backup file");
    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&backup).expect("read")).expect("json");
    assert_eq!(document["vault_password"], PASSWORD);
    assert_eq!(document["vault_setup_complete"], "true");
    assert!(document["exportDate"].is_string());

    // A second vault with a different code takes over the exported one.
    let target_dir = tempdir().expect("tempdir");
    let mut target = launch(&target_dir);
    type_keys(&mut target, "5555");
    press(&mut target, KeyCode::Enter);
    type_keys(&mut target, "5555");
    press(&mut target, KeyCode::Enter);
    trigger_secret(&mut target);
    type_keys(&mut target, "5555");
    press(&mut target, KeyCode::Enter);
    open_settings(&mut target);
    select(&mut target, SettingsItem::ImportBackup);
    press(&mut target, KeyCode::Enter);
    assert_eq!(target.focus(), Focus::PathPrompt);
    type_keys(&mut target, &backup.display().to_string());
    press(&mut target, KeyCode::Enter);
    assert!(toast_titles(&target).contains(&"Imported".to_string()));
    drop(target);

    let reopened = launch(&target_dir);
    assert_eq!(
        reopened.credentials().password().map(|p| p.as_str().to_string()),
        Some(PASSWORD.to_string())
    );
}

#[test]
fn rejected_import_keeps_the_current_code() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);
    open_settings(&mut app);

    let bad = write_file(dir.path(), "short.json", br#"{"vault_password":"12"}"#);
    select(&mut app, SettingsItem::ImportBackup);
    press(&mut app, KeyCode::Enter);
    type_keys(&mut app, &bad.display().to_string());
    press(&mut app, KeyCode::Enter);
    drop(app);

    let reopened = launch(&dir);
    assert_eq!(
        reopened.credentials().password().map(|p| p.as_str().to_string()),
        Some(PASSWORD.to_string())
    );
}

#[test]
fn high_contrast_is_written_to_config() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);
    open_settings(&mut app);

    select(&mut app, SettingsItem::HighContrast);
    press(&mut app, KeyCode::Enter);
    assert!(app.ui_options().high_contrast);

    let config = VaultConfig::load_from(&dir.path().join("config.toml"))
        .expect("parse config")
        .expect("config written");
    assert!(config.app.is_some_and(|app| app.high_contrast));
}
