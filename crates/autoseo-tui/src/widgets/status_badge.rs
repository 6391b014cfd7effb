//! Site status badge: ●/◐/○ with color by badge category.

use ratatui::style::Style;
use ratatui::text::Span;

use autoseo_core::{BadgeCategory, SiteStatus};

use crate::theme;

const fn symbol(category: BadgeCategory) -> &'static str {
    match category {
        BadgeCategory::Success => "●",
        BadgeCategory::Warning => "◐",
        BadgeCategory::Neutral => "○",
    }
}

/// Styled badge: symbol plus the status label.
pub fn badge_span(status: &SiteStatus) -> Span<'static> {
    let category = status.badge();
    Span::styled(
        format!("{} {status}", symbol(category)),
        Style::default().fg(theme::badge_color(category)),
    )
}
