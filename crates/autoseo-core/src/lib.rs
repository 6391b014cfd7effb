//! Domain layer between `autoseo-api` and the dashboard UI.
//!
//! - **[`SiteService`]**: the seam the UI talks to. [`HttpSiteService`] is
//!   the REST implementation; tests provide their own.
//!
//! - **[`DashboardState`]**: the I/O-free state machine behind the dashboard
//!   screen. Submission guard, load ordering, selection.
//!
//! - **Domain model** ([`model`]): [`Site`], [`SiteStatus`] and the badge
//!   category derived from it. Wire records from `autoseo-api` are validated
//!   into these types in [`convert`].

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT, GenerationOptions, ServiceConfig, TlsVerification,
};
pub use dashboard::{DashboardState, LoadTicket, SubmitPhase};
pub use error::{CoreError, ErrorKind};
pub use service::{GenerationRequest, HttpSiteService, SiteService};

pub use model::{
    BadgeCategory, DashboardStats, RecentSite, SeoScore, Site, SiteDetail, SiteId, SiteStatus,
};
