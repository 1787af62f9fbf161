//! Bar-light palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const LIME: Color = Color::Rgb(163, 230, 53); // #a3e635
pub const CITRUS: Color = Color::Rgb(250, 204, 21); // #facc15
pub const GRENADINE: Color = Color::Rgb(244, 63, 94); // #f43f5e
pub const CURACAO: Color = Color::Rgb(56, 189, 248); // #38bdf8
pub const FROST: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const SLATE: Color = Color::Rgb(100, 116, 139); // #64748b
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0f172a

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CURACAO).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(LIME)
}

pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Ordinary list and paragraph text.
pub fn body() -> Style {
    Style::default().fg(FROST)
}

/// Highlighted list entry.
pub fn selected() -> Style {
    Style::default()
        .fg(LIME)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Placeholder / message entries ("No results found.").
pub fn muted() -> Style {
    Style::default().fg(SLATE).add_modifier(Modifier::ITALIC)
}

pub fn input_text() -> Style {
    Style::default().fg(CITRUS)
}

/// Rejected input.
pub fn warning() -> Style {
    Style::default().fg(GRENADINE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(CURACAO).add_modifier(Modifier::BOLD)
}
