//! TUI rendering for calcvault using ratatui.
//!
//! The calculator is the face of the app; everything behind the sentinel is
//! drawn only from the engine's [`ViewModel`].

mod input;
mod theme;
mod vault;

pub use input::{InputPump, apply_event, apply_key, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use calcvault_engine::{
    App, CalculatorView, DraftInput, Focus, LoginView, Screen, SetupStage, SetupView, ViewModel,
};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Screen
        Constraint::Length(1), // Key hints
    ])
    .margin(1)
    .split(frame.area());

    match app.view_model() {
        ViewModel::InitialSetup(view) => draw_setup(frame, &view, chunks[0], &palette, &glyphs),
        ViewModel::Calculator(view) => draw_calculator(frame, &view, chunks[0], &palette),
        ViewModel::VaultLogin(view) => draw_login(frame, &view, chunks[0], &palette, &glyphs),
        ViewModel::VaultDashboard(view) => {
            vault::draw_dashboard(frame, &view, chunks[0], &palette, &glyphs);
        }
        ViewModel::Files(view) => vault::draw_files(frame, &view, chunks[0], &palette, &glyphs),
        ViewModel::Gallery(view) => {
            vault::draw_gallery(frame, &view, chunks[0], &palette, &glyphs);
        }
        ViewModel::Notes(view) => vault::draw_notes(frame, &view, chunks[0], &palette, &glyphs),
        ViewModel::Trash => vault::draw_trash(frame, chunks[0], &palette, &glyphs),
        ViewModel::Settings(view) => {
            vault::draw_settings(frame, &view, chunks[0], &palette, &glyphs);
        }
    }

    draw_key_hints(frame, app.focus(), chunks[1], &palette);
    draw_toasts(frame, app, &palette, &glyphs);
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn panel<'a>(title: impl Into<Line<'a>>, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(title)
        .title_style(styles::title(palette))
        .style(Style::default().bg(palette.bg_panel))
}

/// A `width` x `height` rect centered in `area`, clipped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(crate) fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    let max = max.max(3);
    let trimmed = raw.trim();
    if trimmed.width() <= max {
        return trimmed.to_string();
    }
    let mut head = String::new();
    for c in trimmed.chars() {
        if head.width() + 3 + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) > max {
            break;
        }
        head.push(c);
    }
    format!("{head}...")
}

/// Masked PIN, padded to at least four slots.
pub(crate) fn pin_mask(len: usize, glyphs: &Glyphs) -> String {
    let slots = len.max(4);
    (0..slots)
        .map(|i| if i < len { glyphs.pin_filled } else { glyphs.pin_empty })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Place the terminal cursor at the draft's cursor inside `area` (single line).
pub(crate) fn place_cursor(frame: &mut Frame, draft: &DraftInput, area: Rect, prefix_width: u16) {
    let col = draft.before_cursor().width() as u16;
    let x = (area.x + prefix_width + col).min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

/// Place the cursor inside a multi-line draft rendered from the top of `area`.
pub(crate) fn place_multiline_cursor(frame: &mut Frame, draft: &DraftInput, area: Rect) {
    let before = draft.before_cursor();
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().unwrap_or("").width() as u16;
    let x = (area.x + col).min(area.right().saturating_sub(1));
    let y = (area.y + row).min(area.bottom().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, y));
}

// ============================================================================
// Setup
// ============================================================================

fn draw_setup(frame: &mut Frame, view: &SetupView, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let (heading, len) = match view.stage {
        SetupStage::Enter => ("Choose a vault password", view.password_len),
        SetupStage::Confirm => ("Confirm your password", view.confirm_len),
    };

    let mut lines = vec![
        Line::from(Span::styled(heading, styles::title(palette))),
        Line::from(""),
        Line::from(Span::styled(
            "Digits only, 4 to 8 long. Later, any result of 1337 (try 7 * 191 =) opens the vault.",
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(pin_mask(len, glyphs), styles::display(palette))),
        Line::from(""),
    ];
    if let Some(error) = view.error {
        lines.push(Line::from(Span::styled(error, styles::error(palette))));
    }

    let body = centered(area, 60, 11);
    frame.render_widget(Clear, body);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(panel(format!(" {} ", Screen::InitialSetup.title()), palette)),
        body,
    );
}

// ============================================================================
// Calculator
// ============================================================================

const KEYPAD_ROWS: [[&str; 4]; 5] = [
    ["C", "±", "%", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", "0", ".", "="],
];

fn draw_calculator(frame: &mut Frame, view: &CalculatorView, area: Rect, palette: &Palette) {
    let (calc_area, history_area) = if view.show_history {
        let cols = Layout::horizontal([Constraint::Length(30), Constraint::Min(20)]).split(area);
        (cols[0], Some(cols[1]))
    } else {
        (centered(area, 30, 16), None)
    };

    let block = panel(format!(" {} ", Screen::Calculator.title()), palette);
    let inner = block.inner(calc_area);
    frame.render_widget(Clear, calc_area);
    frame.render_widget(block, calc_area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Pending operation
        Constraint::Length(2), // Display
        Constraint::Min(1),    // Keypad
    ])
    .split(inner);

    let pending = view
        .pending
        .map(|(value, op)| format!("{value} {op}"))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(pending)
            .alignment(Alignment::Right)
            .style(Style::default().fg(palette.text_muted)),
        rows[0],
    );

    let width = rows[1].width.saturating_sub(1) as usize;
    frame.render_widget(
        Paragraph::new(truncate_with_ellipsis(view.display, width))
            .alignment(Alignment::Right)
            .style(styles::display(palette)),
        rows[1],
    );

    let keypad: Vec<Line> = KEYPAD_ROWS
        .iter()
        .flat_map(|row| {
            let spans = row
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let style = if i == 3 {
                        styles::key_highlight(palette)
                    } else {
                        Style::default().fg(palette.text_secondary)
                    };
                    Span::styled(format!("{key:^6}"), style)
                })
                .collect::<Vec<_>>();
            [Line::from(spans), Line::from("")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(keypad).alignment(Alignment::Center),
        rows[2],
    );

    if let Some(history_area) = history_area {
        let lines: Vec<Line> = if view.history.is_empty() {
            vec![Line::from(Span::styled(
                "No calculations yet",
                Style::default().fg(palette.text_muted),
            ))]
        } else {
            view.history
                .iter()
                .map(|entry| Line::from(Span::styled(*entry, Style::default().fg(palette.text_primary))))
                .collect()
        };
        frame.render_widget(
            Paragraph::new(lines).block(panel(" History ", palette)),
            history_area,
        );
    }
}

// ============================================================================
// Login
// ============================================================================

fn draw_login(frame: &mut Frame, view: &LoginView, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} Enter your access code", glyphs.lock),
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(pin_mask(view.code_len, glyphs), styles::display(palette))),
        Line::from(""),
    ];
    if let Some(message) = view.message {
        lines.push(Line::from(Span::styled(message.text(), styles::error(palette))));
    }
    if let Some(remaining) = view.locked_for {
        let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        lines.push(Line::from(Span::styled(
            format!("Try again in {secs}s"),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let body = centered(area, 50, 11);
    frame.render_widget(Clear, body);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(format!(" {} ", Screen::VaultLogin.title()), palette)),
        body,
    );
}

// ============================================================================
// Key hints & toasts
// ============================================================================

fn hints_for(focus: Focus) -> &'static [(&'static str, &'static str)] {
    match focus {
        Focus::Calculator => &[
            ("0-9 . + - * /", "input"),
            ("Enter", "="),
            ("c", "clear"),
            ("n", "±"),
            ("h", "history"),
            ("q", "quit"),
        ],
        Focus::Keypad => &[
            ("0-9", "digit"),
            ("Backspace", "delete"),
            ("Enter", "submit"),
            ("Esc", "back"),
        ],
        Focus::Menu => &[
            ("↑/↓", "select"),
            ("Enter", "open"),
            ("Esc", "back"),
            ("l", "lock"),
        ],
        Focus::List => &[
            ("↑/↓", "select"),
            ("/", "search"),
            ("a", "add"),
            ("n", "new note"),
            ("d", "delete"),
            ("Esc", "back"),
            ("l", "lock"),
        ],
        Focus::Search | Focus::PathPrompt => &[("Enter", "confirm"), ("Esc", "cancel")],
        Focus::ImageDetail => &[("Esc", "close"), ("d", "delete")],
        Focus::NoteEditor => &[
            ("Tab", "switch field"),
            ("Ctrl+S", "save"),
            ("Esc", "discard"),
        ],
        Focus::PasswordForm => &[
            ("Tab", "next field"),
            ("Ctrl+R", "show/hide"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        Focus::ConfirmWipe => &[("y", "delete everything"), ("n", "cancel")],
        Focus::Placeholder => &[("Esc", "back"), ("l", "lock")],
    }
}

fn draw_key_hints(frame: &mut Frame, focus: Focus, area: Rect, palette: &Palette) {
    let spans: Vec<Span> = hints_for(focus)
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, styles::key_highlight(palette)),
                Span::styled(format!(" {action}  "), styles::key_hint(palette)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Stack visible toasts in the top-right corner, newest at the bottom.
fn draw_toasts(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y + 1;
    for toast in app.toasts() {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let color = palette.toast_color(toast.level);
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", glyphs.toast_icon(toast.level)),
                Style::default().fg(color),
            ),
            Span::styled(
                format!("{} ", toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(title)
            .style(Style::default().bg(palette.bg_popup));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.body.as_str())
                .style(Style::default().fg(palette.text_primary))
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
