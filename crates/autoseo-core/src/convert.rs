// ── API-to-domain type conversions ──
//
// The validation step at the service boundary. Raw `autoseo_api` records
// are untrusted: records without an id are rejected, every other missing
// or mistyped field is normalized to a neutral default.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use autoseo_api::{DashboardStatsResponse, RecentSiteRecord, SiteDetailRecord, SiteRecord};

use crate::error::CoreError;
use crate::model::{
    DashboardStats, RecentSite, SeoScore, Site, SiteDetail, SiteId, SiteStatus,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a service timestamp.
///
/// Accepts RFC 3339 as well as the naive ISO-8601 form Python's
/// `datetime.isoformat()` emits for UTC timestamps without an offset.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// ── Site ────────────────────────────────────────────────────────────

impl TryFrom<SiteRecord> for Site {
    type Error = CoreError;

    fn try_from(rec: SiteRecord) -> Result<Self, Self::Error> {
        let id = rec.id.ok_or_else(|| CoreError::MalformedResponse {
            message: format!(
                "site record without id (domain: {})",
                rec.domain.as_deref().unwrap_or("<none>")
            ),
        })?;

        Ok(Site {
            id: SiteId::from(id),
            domain: rec.domain.unwrap_or_default(),
            keyword: rec.keyword.unwrap_or_default(),
            status: SiteStatus::from_wire(rec.status.as_deref()),
            seo_score: SeoScore(rec.seo_score.filter(|s| s.is_finite()).unwrap_or(0.0)),
            title: rec.title.filter(|t| !t.is_empty()),
            cloud_url: rec.cloud_url.filter(|u| !u.is_empty()),
            created_at: parse_datetime(rec.created_at.as_deref()),
        })
    }
}

/// Validate a listing, keeping service order and dropping rejected records.
pub fn sites_from_records(records: Vec<SiteRecord>) -> Vec<Site> {
    records
        .into_iter()
        .filter_map(|rec| match Site::try_from(rec) {
            Ok(site) => Some(site),
            Err(e) => {
                warn!(error = %e, "dropping invalid site record");
                None
            }
        })
        .collect()
}

impl TryFrom<SiteDetailRecord> for SiteDetail {
    type Error = CoreError;

    fn try_from(rec: SiteDetailRecord) -> Result<Self, Self::Error> {
        Ok(SiteDetail {
            site: Site::try_from(rec.site)?,
            cloud_provider: rec.cloud_provider,
            meta_description: rec.meta_description,
            updated_at: parse_datetime(rec.updated_at.as_deref()),
            analytics: rec
                .analytics
                .filter(|a| a.as_object().is_some_and(|o| !o.is_empty())),
        })
    }
}

// ── Stats ───────────────────────────────────────────────────────────

impl From<DashboardStatsResponse> for DashboardStats {
    fn from(resp: DashboardStatsResponse) -> Self {
        DashboardStats {
            total_sites: resp.overview.total_sites,
            deployed_sites: resp.overview.deployed_sites,
            average_seo_score: SeoScore(
                resp.overview
                    .average_seo_score
                    .filter(|s| s.is_finite())
                    .unwrap_or(0.0),
            ),
            recent_sites: resp
                .recent_sites
                .into_iter()
                .filter_map(recent_site)
                .collect(),
        }
    }
}

/// Entries without an id can't be inspected, so they are skipped.
fn recent_site(rec: RecentSiteRecord) -> Option<RecentSite> {
    let Some(id) = rec.id else {
        warn!(domain = ?rec.domain, "dropping recent site without id");
        return None;
    };
    Some(RecentSite {
        id: SiteId::from(id),
        domain: rec.domain.unwrap_or_default(),
        status: SiteStatus::from_wire(rec.status.as_deref()),
        created_at: parse_datetime(rec.created_at.as_deref()),
    })
}
