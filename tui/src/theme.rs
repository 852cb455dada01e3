//! Color theme and glyphs for the calcvault TUI.
//!
//! Slate grays with blue accents, matching the calculator's look. A
//! high-contrast palette swaps everything for named terminal colors.

use ratatui::style::{Color, Modifier, Style};

use calcvault_engine::{ToastLevel, UiOptions};

mod colors {
    use super::Color;

    // === Slate ===
    pub const SLATE_900: Color = Color::Rgb(17, 24, 39);
    pub const SLATE_800: Color = Color::Rgb(31, 41, 55);
    pub const SLATE_750: Color = Color::Rgb(43, 53, 68);
    pub const SLATE_700: Color = Color::Rgb(55, 65, 81);
    pub const SLATE_600: Color = Color::Rgb(75, 85, 99);
    pub const SLATE_500: Color = Color::Rgb(107, 114, 128);
    pub const SLATE_400: Color = Color::Rgb(156, 163, 175);
    pub const SLATE_100: Color = Color::Rgb(243, 244, 246);

    // === Accents ===
    pub const BLUE: Color = Color::Rgb(96, 165, 250);
    pub const VIOLET: Color = Color::Rgb(192, 132, 252);
    pub const ORANGE: Color = Color::Rgb(251, 146, 60);
    pub const GREEN: Color = Color::Rgb(74, 222, 128);
    pub const YELLOW: Color = Color::Rgb(250, 204, 21);
    pub const RED: Color = Color::Rgb(248, 113, 113);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_popup: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub operator: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::SLATE_900,
            bg_panel: colors::SLATE_800,
            bg_highlight: colors::SLATE_700,
            bg_popup: colors::SLATE_750,
            bg_border: colors::SLATE_600,
            text_primary: colors::SLATE_100,
            text_secondary: colors::SLATE_400,
            text_muted: colors::SLATE_500,
            primary: colors::BLUE,
            accent: colors::VIOLET,
            operator: colors::ORANGE,
            success: colors::GREEN,
            warning: colors::YELLOW,
            error: colors::RED,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_popup: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            primary: Color::White,
            accent: Color::Cyan,
            operator: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    #[must_use]
    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => self.accent,
            ToastLevel::Success => self.success,
            ToastLevel::Warning => self.warning,
            ToastLevel::Error => self.error,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons and masks.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub selected: &'static str,
    pub pin_filled: &'static str,
    pub pin_empty: &'static str,
    pub lock: &'static str,
    pub file: &'static str,
    pub image: &'static str,
    pub note: &'static str,
    pub trash: &'static str,
    pub settings: &'static str,
    pub toggle_on: &'static str,
    pub toggle_off: &'static str,
    pub info: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub separator: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            selected: ">",
            pin_filled: "*",
            pin_empty: "_",
            lock: "#",
            file: "F",
            image: "I",
            note: "N",
            trash: "T",
            settings: "S",
            toggle_on: "[x]",
            toggle_off: "[ ]",
            info: "i",
            success: "OK",
            warning: "!",
            error: "ERR",
            separator: "|",
        }
    } else {
        Glyphs {
            selected: "▸",
            pin_filled: "●",
            pin_empty: "○",
            lock: "🔒",
            file: "▤",
            image: "▣",
            note: "✎",
            trash: "✗",
            settings: "⚙",
            toggle_on: "◉",
            toggle_off: "○",
            info: "•",
            success: "✓",
            warning: "⚠",
            error: "✗",
            separator: "│",
        }
    }
}

impl Glyphs {
    #[must_use]
    pub fn toast_icon(&self, level: ToastLevel) -> &'static str {
        match level {
            ToastLevel::Info => self.info,
            ToastLevel::Success => self.success,
            ToastLevel::Warning => self.warning,
            ToastLevel::Error => self.error,
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn display(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.operator)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default().fg(palette.error)
    }
}

#[cfg(test)]
mod tests {
    use calcvault_engine::{ToastLevel, UiOptions};

    use super::{glyphs, palette};

    #[test]
    fn ascii_glyphs_are_ascii() {
        let options = UiOptions {
            ascii_only: true,
            high_contrast: false,
        };
        let g = glyphs(options);
        for glyph in [g.selected, g.pin_filled, g.pin_empty, g.lock, g.success, g.error] {
            assert!(glyph.is_ascii(), "{glyph:?} should be ascii");
        }
    }

    #[test]
    fn high_contrast_uses_named_colors() {
        let options = UiOptions {
            ascii_only: false,
            high_contrast: true,
        };
        let p = palette(options);
        assert_eq!(p.bg_dark, ratatui::style::Color::Black);
        assert_eq!(p.toast_color(ToastLevel::Error), ratatui::style::Color::Red);
    }
}
