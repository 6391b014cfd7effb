// Site Service wire types
//
// Request and response shapes for the AutoSEO backend. Response fields are
// optional with `#[serde(default)]` because the service is the source of
// truth for its own schema; `autoseo-core` validates and normalizes these
// records into domain types before anything renders them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// A site identifier as it appears on the wire.
///
/// The backend uses integer primary keys; string ids are tolerated so a
/// schema change upstream doesn't drop every row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Str(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

// ── Sites ────────────────────────────────────────────────────────────

/// One element of `GET /api/sites`, also returned by `POST /api/sites/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    /// `pending`, `generating`, `deployed`, `failed`, or anything newer.
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    /// Opaque score. Accepts numbers and numeric strings.
    #[serde(default, deserialize_with = "lenient::number")]
    pub seo_score: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cloud_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full site object from `GET /api/sites/{id}`.
///
/// The backend returns the raw database row here, including the rendered
/// HTML `content`, which is deliberately not modeled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteDetailRecord {
    #[serde(flatten)]
    pub site: SiteRecord,
    #[serde(default)]
    pub cloud_provider: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub analytics: Option<serde_json::Value>,
}

/// Body of `POST /api/sites/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateSiteRequest {
    pub keyword: String,
    pub cloud_provider: String,
    pub tone: String,
}

// ── Analytics ────────────────────────────────────────────────────────

/// `GET /api/analytics/dashboard`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default)]
    pub overview: Overview,
    #[serde(default)]
    pub recent_sites: Vec<RecentSiteRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub total_sites: u64,
    #[serde(default)]
    pub deployed_sites: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub average_seo_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentSiteRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ── Health ───────────────────────────────────────────────────────────

/// `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

// ── Errors ───────────────────────────────────────────────────────────

/// FastAPI error body: `{"detail": "..."}` or a list of validation errors.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Flatten `detail` into a single human-readable line.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}

/// Deserializers that degrade a wrongly-typed field to `None` instead of
/// failing the whole record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
