//! Color theme and glyphs for the HYRESIS terminal.
//!
//! Uses Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use hyresis_engine::{LogTone, SlotStatus, Symbol, TraceBand};
use hyresis_types::ui::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet

    // === Accent Colors ===
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed

    // === Semantic Aliases ===
    pub const ACCENT: Color = CYAN;
    pub const SUCCESS: Color = GREEN;
    pub const WARNING: Color = YELLOW;
    pub const ERROR: Color = RED;
    pub const PEACH: Color = ORANGE;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
            peach: colors::PEACH,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            primary: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            peach: Color::Yellow,
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

/// ASCII/Unicode glyphs for markers and the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub prompt: &'static str,
    pub bullet: &'static str,
    pub selected: &'static str,
    pub fragment_full: &'static str,
    pub fragment_empty: &'static str,
    pub locked: &'static str,
    pub cursor_frames: &'static [&'static str],
}

const CURSOR_FRAMES: &[&str] = &["▌", " "];
const CURSOR_FRAMES_ASCII: &[&str] = &["_", " "];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            prompt: ">",
            bullet: "-",
            selected: ">",
            fragment_full: "#",
            fragment_empty: ".",
            locked: "*",
            cursor_frames: CURSOR_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            prompt: "❯",
            bullet: "•",
            selected: "▸",
            fragment_full: "■",
            fragment_empty: "□",
            locked: "◆",
            cursor_frames: CURSOR_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a steady cursor instead of blinking.
#[must_use]
pub fn cursor_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).cursor_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[(tick / 8) % frames.len()]
    }
}

/// Glyph to draw for `symbol` under the current options.
#[must_use]
pub fn symbol_label(symbol: Symbol, options: UiOptions) -> &'static str {
    if options.ascii_only {
        symbol.ascii()
    } else {
        symbol.glyph()
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{LogTone, Modifier, Palette, SlotStatus, Style, TraceBand};

    #[must_use]
    pub fn tone(palette: &Palette, tone: LogTone) -> Style {
        match tone {
            LogTone::Muted => Style::default().fg(palette.text_muted),
            LogTone::Emphasis => Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
            LogTone::Success => Style::default().fg(palette.success),
            LogTone::Warn => Style::default().fg(palette.warning),
            LogTone::Alert => Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        }
    }

    #[must_use]
    pub fn trace(palette: &Palette, band: TraceBand) -> Style {
        let color = match band {
            TraceBand::Low => palette.success,
            TraceBand::Elevated => palette.warning,
            TraceBand::Critical => palette.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Symbol chip colored by the best feedback it has earned this clause.
    #[must_use]
    pub fn chip(palette: &Palette, status: Option<SlotStatus>) -> Style {
        let base = Style::default().bg(palette.bg_highlight);
        match status {
            None => base.fg(palette.text_secondary),
            Some(SlotStatus::Absent) => base.fg(palette.text_muted),
            Some(SlotStatus::Present) => base.fg(palette.warning).add_modifier(Modifier::BOLD),
            Some(SlotStatus::Correct) => base.fg(palette.success).add_modifier(Modifier::BOLD),
        }
    }

    #[must_use]
    pub fn chip_selected(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn phase_badge(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use hyresis_engine::Symbol;
    use hyresis_types::ui::UiOptions;

    use super::{cursor_frame, symbol_label};

    #[test]
    fn cursor_blinks_without_reduced_motion() {
        let options = UiOptions::default();
        assert_ne!(cursor_frame(0, options), cursor_frame(8, options));
    }

    #[test]
    fn cursor_static_with_reduced_motion() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        assert_eq!(cursor_frame(0, options), cursor_frame(8, options));
        assert_eq!(cursor_frame(0, options), "▌");
    }

    #[test]
    fn ascii_only_swaps_symbol_glyphs() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        assert_eq!(symbol_label(Symbol::Implies, options), "=>");
        assert_eq!(symbol_label(Symbol::Implies, UiOptions::default()), "⇒");
    }
}
