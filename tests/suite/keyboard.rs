//! Whole sessions driven through the key bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use calcvault_core::{LOCKOUT_DURATION, MAX_ATTEMPTS};
use calcvault_engine::{Focus, LoginMessage, Screen};

use crate::common::{
    PASSWORD, advance, complete_setup, launch, press, press_ctrl, toast_titles, trigger_secret,
    type_keys, unlock, write_file,
};

#[test]
fn calculator_behaves_like_a_calculator() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);

    type_keys(&mut app, "12+30=");
    assert_eq!(app.calculator().display(), "42");
    type_keys(&mut app, "/0=");
    assert_eq!(app.calculator().display(), "0");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.calculator().display(), "0");
    assert_eq!(app.screen(), Screen::Calculator);
}

#[test]
fn secret_result_leads_to_the_vault() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);

    trigger_secret(&mut app);
    assert_eq!(app.screen(), Screen::VaultLogin);
    assert!(toast_titles(&app).contains(&"Secret access detected".to_string()));

    type_keys(&mut app, PASSWORD);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::VaultDashboard);
    assert_eq!(app.focus(), Focus::Menu);

    press(&mut app, KeyCode::Char('l'));
    assert_eq!(app.screen(), Screen::Calculator);
    assert!(toast_titles(&app).contains(&"Vault locked".to_string()));
}

#[test]
fn lockout_blocks_the_keypad_until_it_expires() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    trigger_secret(&mut app);

    for _ in 0..MAX_ATTEMPTS {
        type_keys(&mut app, "0000");
        press(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.view_state().login.message, Some(LoginMessage::Locked));

    type_keys(&mut app, PASSWORD);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::VaultLogin);
    assert_eq!(app.view_state().login.message, Some(LoginMessage::StillLocked));

    advance(&mut app, LOCKOUT_DURATION);
    assert!(toast_titles(&app).contains(&"Vault unlocked".to_string()));

    type_keys(&mut app, PASSWORD);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::VaultDashboard);
}

#[test]
fn files_add_search_and_delete() {
    let dir = tempdir().expect("tempdir");
    let report = write_file(dir.path(), "report.txt", b"quarterly numbers");
    let plan = write_file(dir.path(), "plan.md", b"# plan");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Files);

    for path in [&report, &plan] {
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.focus(), Focus::PathPrompt);
        type_keys(&mut app, &path.display().to_string());
        press(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.files().len(), 2);
    assert_eq!(app.focus(), Focus::List);

    press(&mut app, KeyCode::Char('/'));
    type_keys(&mut app, "PLAN");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.files().list("PLAN").len(), 1);

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.files().len(), 1);
    assert_eq!(
        app.files().iter().next().map(|f| f.name.as_str()),
        Some("report.txt")
    );

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen(), Screen::VaultDashboard);
}

#[test]
fn gallery_accepts_images_only() {
    let dir = tempdir().expect("tempdir");
    let photo = write_file(dir.path(), "beach.PNG", &[0x89, b'P', b'N', b'G']);
    let text = write_file(dir.path(), "notes.txt", b"hello");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Gallery);

    press(&mut app, KeyCode::Char('a'));
    type_keys(&mut app, &text.display().to_string());
    press(&mut app, KeyCode::Enter);
    assert!(app.gallery().is_empty());
    assert!(toast_titles(&app).contains(&"Not an image".to_string()));

    press(&mut app, KeyCode::Char('a'));
    type_keys(&mut app, &photo.display().to_string());
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.gallery().len(), 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus(), Focus::ImageDetail);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focus(), Focus::List);
}

#[test]
fn notes_are_written_and_saved_with_ctrl_s() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Notes);

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.focus(), Focus::NoteEditor);
    press(&mut app, KeyCode::Tab);
    type_keys(&mut app, "milk");
    press(&mut app, KeyCode::Enter);
    type_keys(&mut app, "eggs");
    press_ctrl(&mut app, 's');

    assert_eq!(app.focus(), Focus::List);
    let note = app.notes().iter().next().expect("note saved");
    assert_eq!(note.content, "milk\neggs");
    assert!(note.modified_at >= note.created_at);
}

#[test]
fn quit_keys_end_the_session() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());

    let mut other = launch(&dir);
    unlock(&mut other);
    let quit = calcvault_tui::apply_event(
        &mut other,
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    );
    assert!(quit);
}
