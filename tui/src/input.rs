//! Input handling for the calcvault TUI.
//!
//! Keys are routed by the engine's current [`Focus`]; the engine decides what
//! each action means on the active screen.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use calcvault_engine::{App, Focus, Operator, Screen};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a thread blocked on send wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into the app. Returns `true` when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should exit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }
            apply_key(app, key);
        }
        Event::Paste(text) => {
            if accepts_text(app.focus()) {
                debug!(len = text.len(), "Paste into focused input");
                for c in text.chars().filter(|c| !c.is_control()) {
                    app.insert_char(c);
                }
            }
        }
        _ => {}
    }
    app.should_quit()
}

/// Route a key press by focus.
pub fn apply_key(app: &mut App, key: KeyEvent) {
    match app.focus() {
        Focus::Calculator => handle_calculator(app, key),
        Focus::Keypad => handle_keypad(app, key),
        Focus::Menu => handle_menu(app, key),
        Focus::List => handle_list(app, key),
        Focus::Search | Focus::PathPrompt => handle_line_input(app, key),
        Focus::ImageDetail => handle_image_detail(app, key),
        Focus::NoteEditor => handle_note_editor(app, key),
        Focus::PasswordForm => handle_password_form(app, key),
        Focus::ConfirmWipe => handle_confirm_wipe(app, key),
        Focus::Placeholder => handle_placeholder(app, key),
    }
}

fn accepts_text(focus: Focus) -> bool {
    matches!(
        focus,
        Focus::Keypad | Focus::Search | Focus::PathPrompt | Focus::NoteEditor | Focus::PasswordForm
    )
}

fn handle_calculator(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => app.calc_digit(c),
        KeyCode::Char('.' | ',') => app.calc_decimal(),
        KeyCode::Enter | KeyCode::Char('=') => app.calc_evaluate(),
        KeyCode::Char('c' | 'C') | KeyCode::Esc => app.calc_clear(),
        KeyCode::Char('n') => app.calc_negate(),
        KeyCode::Char('%') => app.calc_percent(),
        KeyCode::Char('h') => app.toggle_history(),
        KeyCode::Char('H') => app.clear_history(),
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char(c) => {
            if let Some(op) = Operator::from_char(c) {
                app.calc_operator(op);
            }
        }
        _ => {}
    }
}

fn handle_keypad(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Delete | KeyCode::Char('c') => match app.screen() {
            Screen::InitialSetup => app.setup_clear(),
            _ => app.login_clear(),
        },
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit(),
        KeyCode::Char('l') => app.logout(),
        KeyCode::Esc | KeyCode::Char('b') => app.cancel(),
        _ => {}
    }
}

fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('/') => app.search_start(),
        KeyCode::Char('a') => app.add_start(),
        KeyCode::Char('n') => app.new_note(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Enter => app.submit(),
        KeyCode::Esc | KeyCode::Char('b') => app.cancel(),
        KeyCode::Char('l') => app.logout(),
        _ => {}
    }
}

fn handle_line_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_image_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.cancel(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

fn handle_note_editor(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            app.editor_save();
        }
        return;
    }
    match key.code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab => app.editor_switch_field(),
        KeyCode::Left => app.editor_cursor_left(),
        KeyCode::Right => app.editor_cursor_right(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_password_form(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            app.password_form_toggle_reveal();
        }
        return;
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Tab | KeyCode::Down => app.password_form_next_field(),
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

fn handle_confirm_wipe(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y' | 'Y') => app.confirm_wipe(true),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.confirm_wipe(false),
        _ => {}
    }
}

fn handle_placeholder(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.cancel(),
        KeyCode::Char('l') => app.logout(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use calcvault_core::CredentialStore;
    use calcvault_engine::{AppOptions, UiOptions};

    use super::*;

    fn app_with_password() -> App {
        let mut credentials = CredentialStore::in_memory();
        credentials.save("1234").expect("save");
        App::new(
            credentials,
            AppOptions {
                ui_options: UiOptions::default(),
                backup_dir: PathBuf::from("/nonexistent"),
                config_path: None,
            },
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_keys(app: &mut App, keys: &str) {
        for c in keys.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn calculator_keys_compute() {
        let mut app = app_with_password();
        type_keys(&mut app, "12+30");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calculator().display(), "42");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.calculator().display(), "0");
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = app_with_password();
        let quit = apply_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(quit);
        assert!(app.should_quit());
    }

    #[test]
    fn keypad_ignores_letters_and_unlocks() {
        let mut app = app_with_password();
        app.dispatch(calcvault_engine::Intent::SecretDetected);
        type_keys(&mut app, "1x2y34");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::VaultDashboard);
    }

    #[test]
    fn paste_lands_in_search_box() {
        let mut app = app_with_password();
        app.dispatch(calcvault_engine::Intent::SecretDetected);
        type_keys(&mut app, "1234");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Files);

        press(&mut app, KeyCode::Char('/'));
        apply_event(&mut app, Event::Paste("report\n".to_string()));
        let browser = app.view_state().browser(Screen::Files).expect("browser");
        assert_eq!(browser.search.text(), "report");
    }
}
