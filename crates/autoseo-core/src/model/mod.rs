// ── Domain model ──
//
// Canonical types the dashboard renders. Nothing here knows about HTTP;
// `convert` builds these from `autoseo_api` wire records.

pub mod entity_id;
pub mod site;

pub use entity_id::SiteId;
pub use site::{
    BadgeCategory, DashboardStats, RecentSite, SeoScore, Site, SiteDetail, SiteStatus,
};
