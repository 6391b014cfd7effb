//! All possible UI actions. Actions are the sole mechanism for state mutation.

use autoseo_core::{DashboardStats, GenerationRequest, LoadTicket, Site, SiteDetail, SiteId};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
///
/// Errors travel as user-facing strings so actions stay `Clone`.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Site list ─────────────────────────────────────────────────
    /// Ask the dashboard for a fresh load ticket.
    RefreshSites,
    /// Fetch the list and, separately, the overview stats for this ticket.
    FetchSites(LoadTicket),
    SitesLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Site>, String>,
    },
    /// `None` when the analytics endpoint failed.
    StatsLoaded {
        ticket: LoadTicket,
        stats: Option<DashboardStats>,
    },

    // ── Generation ────────────────────────────────────────────────
    SubmitGeneration(GenerationRequest),
    /// Settled generation request; `Ok` carries the created site, if returned.
    GenerationFinished(Result<Option<Site>, String>),

    // ── Detail ────────────────────────────────────────────────────
    InspectSite(SiteId),
    SiteDetailLoaded(Result<SiteDetail, String>),

    // ── Health ────────────────────────────────────────────────────
    CheckHealth,
    HealthChecked(bool),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
