//! Vault pages: dashboard, content lists, note editor and settings.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use calcvault_engine::{
    BrowserMode, DashboardView, EditorField, FilesView, Focus, GalleryView, ListControls,
    NoteEditor, NotesView, PasswordField, PasswordForm, PinPad, Screen, SettingsItem,
    SettingsPanel, SettingsView, format_size,
};

use crate::theme::{Glyphs, Palette, styles};
use crate::{centered, panel, pin_mask, place_cursor, place_multiline_cursor, truncate_with_ellipsis};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn screen_icon(screen: Screen, glyphs: &Glyphs) -> &'static str {
    match screen {
        Screen::Files => glyphs.file,
        Screen::Gallery => glyphs.image,
        Screen::Notes => glyphs.note,
        Screen::Trash => glyphs.trash,
        Screen::Settings => glyphs.settings,
        _ => glyphs.lock,
    }
}

fn row_style(selected: bool, palette: &Palette) -> Style {
    if selected {
        styles::selected(palette)
    } else {
        Style::default().fg(palette.text_primary)
    }
}

fn marker(selected: bool, glyphs: &Glyphs) -> &'static str {
    if selected { glyphs.selected } else { " " }
}

fn empty_line<'a>(text: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(palette.text_muted)))
}

// ============================================================================
// Dashboard
// ============================================================================

pub(crate) fn draw_dashboard(
    frame: &mut Frame,
    view: &DashboardView,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Everything here stays on this device.",
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
    ];
    for (index, item) in view.items.iter().enumerate() {
        let selected = index == view.selected;
        let count = item
            .count
            .map(|n| format!("  ({n})"))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker(selected, glyphs)), styles::key_highlight(palette)),
            Span::styled(
                format!("{} {}{count} ", screen_icon(item.screen, glyphs), item.screen.title()),
                row_style(selected, palette),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Storage used: {}", format_size(view.total_bytes)),
        Style::default().fg(palette.text_muted),
    )));

    let body = centered(area, 50, (view.items.len() as u16) + 8);
    frame.render_widget(Clear, body);
    frame.render_widget(
        Paragraph::new(lines).block(panel(format!(" {} Secure Vault ", glyphs.lock), palette)),
        body,
    );
}

// ============================================================================
// Lists
// ============================================================================

/// Split a list page into a control line and the list body; draws the controls.
fn draw_controls(
    frame: &mut Frame,
    controls: &ListControls,
    area: Rect,
    palette: &Palette,
) -> Rect {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);
    let (label, draft, active) = match controls.mode {
        BrowserMode::AddPath => ("Path: ", controls.path, true),
        BrowserMode::Search => ("Search: ", controls.search, true),
        BrowserMode::Browse => ("Search: ", controls.search, false),
    };
    if active || !draft.is_empty() {
        let line = Line::from(vec![
            Span::styled(label, styles::key_highlight(palette)),
            Span::styled(draft.text(), Style::default().fg(palette.text_primary)),
        ]);
        frame.render_widget(Paragraph::new(line), rows[0]);
        if active && matches!(controls.focus, Focus::Search | Focus::PathPrompt) {
            place_cursor(frame, draft, rows[0], label.width() as u16);
        }
    }
    rows[1]
}

pub(crate) fn draw_files(
    frame: &mut Frame,
    view: &FilesView,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let title = format!(
        " {} {} ({}, {}) ",
        glyphs.file,
        Screen::Files.title(),
        view.records.len(),
        format_size(view.total_bytes)
    );
    let block = panel(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let list_area = draw_controls(frame, &view.controls, inner, palette);

    let name_width = (list_area.width as usize).saturating_sub(36).max(8);
    let lines: Vec<Line> = if view.records.is_empty() {
        vec![empty_line("No files yet. Press a to add one from disk.", palette)]
    } else {
        view.records
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let selected = index == view.controls.selected;
                Line::from(vec![
                    Span::styled(format!("{} ", marker(selected, glyphs)), styles::key_highlight(palette)),
                    Span::styled(
                        format!(
                            "{:<name_width$} {:>6} {:>9}  {}",
                            truncate_with_ellipsis(&file.name, name_width),
                            file.kind,
                            format_size(file.size()),
                            file.created_at.format(DATE_FORMAT),
                        ),
                        row_style(selected, palette),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), list_area);
}

pub(crate) fn draw_gallery(
    frame: &mut Frame,
    view: &GalleryView,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let title = format!(
        " {} {} ({}) ",
        glyphs.image,
        Screen::Gallery.title(),
        view.records.len()
    );
    let block = panel(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let list_area = draw_controls(frame, &view.controls, inner, palette);

    let lines: Vec<Line> = if view.records.is_empty() {
        vec![empty_line("No images yet. Press a to add one from disk.", palette)]
    } else {
        view.records
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let selected = index == view.controls.selected;
                Line::from(vec![
                    Span::styled(format!("{} ", marker(selected, glyphs)), styles::key_highlight(palette)),
                    Span::styled(
                        format!(
                            "{} {}  {}  {}",
                            glyphs.image,
                            image.name,
                            image.format.as_str(),
                            format_size(image.size())
                        ),
                        row_style(selected, palette),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), list_area);

    if let Some(image) = view.detail {
        let popup = centered(area, 50, 8);
        let lines = vec![
            Line::from(Span::styled(image.name.as_str(), styles::display(palette))),
            Line::from(""),
            Line::from(format!(
                "{} image, {}",
                image.format.as_str(),
                format_size(image.size())
            )),
            Line::from(format!("Added {}", image.created_at.format(DATE_FORMAT))),
        ];
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.text_primary))
                .block(panel(" Image ", palette).style(Style::default().bg(palette.bg_popup))),
            popup,
        );
    }
}

pub(crate) fn draw_notes(
    frame: &mut Frame,
    view: &NotesView,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    if let Some(editor) = view.editor {
        draw_note_editor(frame, editor, area, palette, glyphs);
        return;
    }

    let title = format!(" {} {} ({}) ", glyphs.note, Screen::Notes.title(), view.records.len());
    let block = panel(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let list_area = draw_controls(frame, &view.controls, inner, palette);

    let preview_width = (list_area.width as usize).saturating_sub(4);
    let mut lines = Vec::new();
    if view.records.is_empty() {
        lines.push(empty_line("No notes yet. Press n to write one.", palette));
    }
    for (index, note) in view.records.iter().enumerate() {
        let selected = index == view.controls.selected;
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker(selected, glyphs)), styles::key_highlight(palette)),
            Span::styled(
                truncate_with_ellipsis(&note.title, preview_width),
                row_style(selected, palette).add_modifier(Modifier::BOLD),
            ),
        ]));
        let preview = note.content.lines().next().unwrap_or("");
        lines.push(Line::from(Span::styled(
            format!(
                "  {}  {}",
                note.modified_at.format(DATE_FORMAT),
                truncate_with_ellipsis(preview, preview_width.saturating_sub(20))
            ),
            Style::default().fg(palette.text_muted),
        )));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn draw_note_editor(
    frame: &mut Frame,
    editor: &NoteEditor,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);
    let border = |active: bool| {
        if active {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.bg_border)
        }
    };

    let title_active = editor.field == EditorField::Title;
    let title_block = panel(format!(" {} Title ", glyphs.note), palette).border_style(border(title_active));
    let title_inner = title_block.inner(rows[0]);
    frame.render_widget(
        Paragraph::new(editor.title.text())
            .style(Style::default().fg(palette.text_primary))
            .block(title_block),
        rows[0],
    );

    let content_block = panel(" Content ", palette).border_style(border(!title_active));
    let content_inner = content_block.inner(rows[1]);
    frame.render_widget(
        Paragraph::new(editor.content.text())
            .style(Style::default().fg(palette.text_primary))
            .block(content_block),
        rows[1],
    );

    if title_active {
        place_cursor(frame, &editor.title, title_inner, 0);
    } else {
        place_multiline_cursor(frame, &editor.content, content_inner);
    }
}

pub(crate) fn draw_trash(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let lines = vec![
        Line::from(Span::styled("Trash is empty", styles::display(palette))),
        Line::from(""),
        Line::from(Span::styled(
            "Coming soon: recently deleted items will wait here.",
            Style::default().fg(palette.text_muted),
        )),
    ];
    let body = centered(area, 50, 7);
    frame.render_widget(Clear, body);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(format!(" {} {} ", glyphs.trash, Screen::Trash.title()), palette)),
        body,
    );
}

// ============================================================================
// Settings
// ============================================================================

fn setting_value(item: SettingsItem, view: &SettingsView, glyphs: &Glyphs) -> String {
    let toggle = |on: bool| {
        let glyph = if on { glyphs.toggle_on } else { glyphs.toggle_off };
        glyph.to_string()
    };
    match item {
        SettingsItem::AutoLock => toggle(view.lock.auto_lock),
        SettingsItem::LockTime => format!("{} min", view.lock.lock_time.minutes()),
        SettingsItem::HighContrast => toggle(view.high_contrast),
        SettingsItem::ExportBackup => view.backup_dir.display().to_string(),
        SettingsItem::ChangePassword
        | SettingsItem::ImportBackup
        | SettingsItem::WipeData
        | SettingsItem::Logout => String::new(),
    }
}

pub(crate) fn draw_settings(
    frame: &mut Frame,
    view: &SettingsView,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let value_width = (area.width as usize).saturating_sub(30);
    let lines: Vec<Line> = view
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let selected = index == view.selected;
            let label_style = if *item == SettingsItem::WipeData {
                row_style(selected, palette).fg(palette.error)
            } else {
                row_style(selected, palette)
            };
            Line::from(vec![
                Span::styled(format!(" {} ", marker(selected, glyphs)), styles::key_highlight(palette)),
                Span::styled(format!("{:<20}", item.label()), label_style),
                Span::styled(
                    truncate_with_ellipsis(&setting_value(*item, view, glyphs), value_width),
                    Style::default().fg(palette.text_secondary),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(panel(
            format!(" {} {} ", glyphs.settings, Screen::Settings.title()),
            palette,
        )),
        area,
    );

    match view.panel {
        SettingsPanel::Menu => {}
        SettingsPanel::ChangePassword(form) => draw_password_form(frame, form, area, palette, glyphs),
        SettingsPanel::ImportPath(path) => {
            let popup = centered(area, 70, 5);
            let block = panel(" Import backup ", palette);
            let inner = block.inner(popup);
            let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);
            frame.render_widget(Clear, popup);
            frame.render_widget(block, popup);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Path to a vault_backup_*.json file:",
                    Style::default().fg(palette.text_secondary),
                )),
                rows[0],
            );
            frame.render_widget(
                Paragraph::new(Span::styled(path.text(), Style::default().fg(palette.text_primary))),
                rows[1],
            );
            place_cursor(frame, path, rows[1], 0);
        }
        SettingsPanel::ConfirmWipe => {
            let popup = centered(area, 56, 7);
            let lines = vec![
                Line::from(Span::styled(
                    "Delete all data?",
                    styles::error(palette).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("This removes your password and every stored item."),
                Line::from("It cannot be undone. Press y to confirm."),
            ];
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(palette.text_primary))
                    .block(panel(" Confirm ", palette)),
                popup,
            );
        }
    }
}

fn draw_password_form(
    frame: &mut Frame,
    form: &PasswordForm,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let show = |pad: &PinPad| {
        if form.reveal {
            pad.as_str().to_string()
        } else {
            pin_mask(pad.len(), glyphs)
        }
    };
    let fields = [
        (PasswordField::Current, "Current password", &form.current),
        (PasswordField::New, "New password", &form.next),
        (PasswordField::Confirm, "Confirm new password", &form.confirm),
    ];
    let lines: Vec<Line> = fields
        .iter()
        .map(|(field, label, pad)| {
            let active = *field == form.field;
            Line::from(vec![
                Span::styled(format!(" {} ", marker(active, glyphs)), styles::key_highlight(palette)),
                Span::styled(format!("{label:<22}"), row_style(active, palette)),
                Span::styled(show(pad), styles::display(palette)),
            ])
        })
        .collect();

    let popup = centered(area, 56, 6);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(panel(" Change password ", palette)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ratatui::{Terminal, backend::TestBackend};

    use calcvault_core::CredentialStore;
    use calcvault_engine::{App, AppOptions, Intent, UiOptions};

    use crate::draw;

    fn unlocked(dir: &tempfile::TempDir) -> App {
        let mut credentials = CredentialStore::in_memory();
        credentials.save("1234").expect("save");
        let mut app = App::new(
            credentials,
            AppOptions {
                ui_options: UiOptions {
                    ascii_only: true,
                    high_contrast: false,
                },
                backup_dir: dir.path().to_path_buf(),
                config_path: None,
            },
        );
        app.dispatch(Intent::SecretDetected);
        for c in "1234".chars() {
            app.insert_char(c);
        }
        app.submit();
        app
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn dashboard_lists_pages_and_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = unlocked(&dir);
        let text = screen_text(&app);
        for title in ["File Manager", "Image Gallery", "Notes", "Trash", "Settings"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("Storage used: 0 B"));
    }

    #[test]
    fn files_page_lists_imported_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("budget.csv");
        fs::write(&path, b"a,b,c").expect("write");
        let mut app = unlocked(&dir);
        app.submit();
        app.add_start();
        for c in path.display().to_string().chars() {
            app.insert_char(c);
        }
        app.submit();
        // Let the toasts covering the right-hand columns expire.
        let start = app.clock();
        app.tick_at(start);
        app.tick_at(start + std::time::Duration::from_secs(5));

        let text = screen_text(&app);
        assert!(text.contains("budget.csv"));
        assert!(text.contains("CSV"));
        assert!(text.contains("5 B"));
    }

    #[test]
    fn settings_shows_values_and_wipe_prompt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = unlocked(&dir);
        for _ in 0..4 {
            app.select_next();
        }
        app.submit();
        let text = screen_text(&app);
        assert!(text.contains("Auto-lock"));
        assert!(text.contains("5 min"));

        for _ in 0..6 {
            app.select_next();
        }
        app.submit();
        let text = screen_text(&app);
        assert!(text.contains("Delete all data?"));
    }
}
