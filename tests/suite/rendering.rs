//! Full frames rendered from a real session.

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::tempdir;

use calcvault_engine::{App, Screen};

use crate::common::{advance, complete_setup, launch, press, type_keys, unlock, write_file};

fn frame_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
    terminal
        .draw(|frame| calcvault_tui::draw(frame, app))
        .expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in buffer.area.top()..buffer.area.bottom() {
        for x in buffer.area.left()..buffer.area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn settle_toasts(app: &mut App) {
    advance(app, Duration::ZERO);
    advance(app, Duration::from_secs(4));
}

#[test]
fn first_run_shows_setup() {
    let dir = tempdir().expect("tempdir");
    let app = launch(&dir);
    let text = frame_text(&app);
    assert!(text.contains("Vault Setup"), "{text}");
}

#[test]
fn calculator_gives_nothing_away() {
    let dir = tempdir().expect("tempdir");
    let mut app = launch(&dir);
    complete_setup(&mut app);
    settle_toasts(&mut app);

    let text = frame_text(&app);
    assert!(text.contains("Calculator"), "{text}");
    assert!(!text.contains("Vault"), "{text}");
    assert!(!text.contains("Secure"), "{text}");
}

#[test]
fn unlocked_dashboard_reports_storage() {
    let dir = tempdir().expect("tempdir");
    let file = write_file(dir.path(), "a.bin", &[0u8; 2048]);
    let mut app = launch(&dir);
    complete_setup(&mut app);
    unlock(&mut app);

    app.open_page(Screen::Files);
    press(&mut app, KeyCode::Char('a'));
    type_keys(&mut app, &file.display().to_string());
    press(&mut app, KeyCode::Enter);
    app.go_back();
    settle_toasts(&mut app);

    let text = frame_text(&app);
    assert!(text.contains("Secure Vault"), "{text}");
    assert!(text.contains("2.0 KB"), "{text}");
}
