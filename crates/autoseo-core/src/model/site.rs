// ── Site domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;

use super::entity_id::SiteId;

/// Lifecycle status reported by the Site Service.
///
/// The service owns the set of values; anything it invents later lands in
/// `Other` and renders neutrally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[non_exhaustive]
pub enum SiteStatus {
    Pending,
    Generating,
    Deployed,
    Failed,
    /// A status string this client doesn't know.
    #[strum(default)]
    Other(String),
    /// No status on the record.
    #[default]
    #[strum(disabled)]
    Unknown,
}

impl SiteStatus {
    /// Parse a wire status. Missing values become `Unknown`.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Unknown,
            Some(s) => s.parse().unwrap_or_else(|_| Self::Other(s.to_owned())),
        }
    }

    /// Visual category of the status badge.
    pub fn badge(&self) -> BadgeCategory {
        match self {
            Self::Deployed => BadgeCategory::Success,
            Self::Generating => BadgeCategory::Warning,
            _ => BadgeCategory::Neutral,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Deployed => "deployed",
            Self::Failed => "failed",
            Self::Other(s) => s,
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-way badge category. Pure function of [`SiteStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeCategory {
    Success,
    Warning,
    Neutral,
}

/// Opaque SEO score supplied by the service.
///
/// No scale or range is assumed; integral values display without decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeoScore(pub f64);

impl fmt::Display for SeoScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract().abs() < f64::EPSILON {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

/// A generated (or in-progress) website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub domain: String,
    pub keyword: String,
    pub status: SiteStatus,
    pub seo_score: SeoScore,
    pub title: Option<String>,
    pub cloud_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Full record from the per-site endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDetail {
    pub site: Site,
    pub cloud_provider: Option<String>,
    pub meta_description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Opaque analytics blob (word count, deployment time, error text...).
    pub analytics: Option<serde_json::Value>,
}

/// Aggregate figures from the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sites: u64,
    pub deployed_sites: u64,
    pub average_seo_score: SeoScore,
    /// Newest first, as the service orders them.
    pub recent_sites: Vec<RecentSite>,
}

/// Short entry in the analytics endpoint's recently-created list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSite {
    pub id: SiteId,
    pub domain: String,
    pub status: SiteStatus,
    pub created_at: Option<DateTime<Utc>>,
}
