//! Harmattan palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 179, 71); // #ffb347
pub const TEAL: Color = Color::Rgb(94, 234, 212); // #5eead4
pub const OK_GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const ALERT_RED: Color = Color::Rgb(248, 113, 113); // #f87171
pub const SKY: Color = Color::Rgb(125, 211, 252); // #7dd3fc

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const SLATE: Color = Color::Rgb(100, 116, 139); // #64748b
pub const BG_PANEL: Color = Color::Rgb(30, 33, 43); // #1e212b
pub const BG_DARK: Color = Color::Rgb(21, 23, 30); // #15171e

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(TEAL)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(AMBER)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG)
}

/// Selected / highlighted row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(TEAL)
        .bg(BG_PANEL)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(FOG)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Form field label.
pub fn field_label() -> Style {
    Style::default().fg(FOG)
}

/// Form field label when focused.
pub fn field_label_focused() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Validation / error line inside a form.
pub fn form_error() -> Style {
    Style::default().fg(ALERT_RED).add_modifier(Modifier::BOLD)
}
