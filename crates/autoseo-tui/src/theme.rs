//! Neon palette and the semantic styles built from it.

use ratatui::style::{Color, Modifier, Style};

use autoseo_core::BadgeCategory;

use crate::action::NotificationLevel;

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255);
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234);
pub const CORAL: Color = Color::Rgb(255, 106, 193);
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140);
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123);
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99);
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207);
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164);
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54);
pub const BG_DARK: Color = Color::Rgb(30, 31, 41);

// ── Status colours ────────────────────────────────────────────────────

/// Deployed green, generating yellow, everything else dim.
pub const fn badge_color(category: BadgeCategory) -> Color {
    match category {
        BadgeCategory::Success => SUCCESS_GREEN,
        BadgeCategory::Warning => ELECTRIC_YELLOW,
        BadgeCategory::Neutral => DIM_WHITE,
    }
}

pub const fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Success => SUCCESS_GREEN,
        NotificationLevel::Error => ERROR_RED,
        NotificationLevel::Info => NEON_CYAN,
    }
}

// ── Panels ────────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Banners under the input and above the list.
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

// ── Site table ────────────────────────────────────────────────────────

pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn score_style() -> Style {
    Style::default().fg(CORAL)
}

// ── Generate trigger ──────────────────────────────────────────────────

pub fn button_active() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Shown while a generation request is in flight.
pub fn button_disabled() -> Style {
    Style::default().fg(BORDER_GRAY).bg(BG_HIGHLIGHT)
}

// ── Hints ─────────────────────────────────────────────────────────────

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}
