// Site Service endpoints
//
// `/api/sites` listing and generation, per-site detail, the analytics
// overview, and the health check.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{SiteClient, decode};
use crate::error::Error;
use crate::models::{
    DashboardStatsResponse, GenerateSiteRequest, HealthResponse, SiteDetailRecord, SiteRecord,
};

impl SiteClient {
    /// List all generated sites, in the order the service returns them.
    ///
    /// `GET /api/sites`
    ///
    /// A body that isn't a JSON array is an `Error::Deserialization`.
    /// Individual elements that aren't objects are skipped with a warning
    /// so one bad row doesn't hide the rest.
    pub async fn list_sites(&self) -> Result<Vec<SiteRecord>, Error> {
        let url = self.url("api/sites")?;
        debug!("listing sites");
        let body: Value = self.get(url).await?;

        let Value::Array(items) = body else {
            return Err(Error::Deserialization {
                message: format!("expected an array of sites, got {}", json_kind(&body)),
                body: body.to_string(),
            });
        };

        let mut sites = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<SiteRecord>(item) {
                Ok(site) => sites.push(site),
                Err(e) => warn!(index, error = %e, "skipping undecodable site record"),
            }
        }
        Ok(sites)
    }

    /// Ask the service to generate a new site.
    ///
    /// `POST /api/sites/generate` with `{"keyword", "cloud_provider", "tone"}`
    ///
    /// Returns the created record when the response body decodes as one;
    /// the service may answer with any 2xx (200 or 201).
    pub async fn generate_site(
        &self,
        request: &GenerateSiteRequest,
    ) -> Result<Option<SiteRecord>, Error> {
        let url = self.url("api/sites/generate")?;
        debug!(keyword = %request.keyword, provider = %request.cloud_provider, "requesting site generation");
        let body = self.post(url, request).await?;

        match decode::<SiteRecord>(&body) {
            Ok(site) => Ok(Some(site)),
            Err(e) => {
                debug!(error = %e, "generation response not a site record");
                Ok(None)
            }
        }
    }

    /// Fetch the full record for one site.
    ///
    /// `GET /api/sites/{id}`
    pub async fn get_site(&self, id: &str) -> Result<SiteDetailRecord, Error> {
        let url = self.url(&format!("api/sites/{id}"))?;
        debug!(id, "fetching site detail");
        self.get(url).await
    }

    /// Aggregate counts and recent activity.
    ///
    /// `GET /api/analytics/dashboard`
    pub async fn dashboard_stats(&self) -> Result<DashboardStatsResponse, Error> {
        let url = self.url("api/analytics/dashboard")?;
        debug!("fetching dashboard stats");
        self.get(url).await
    }

    /// Service liveness check.
    ///
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, Error> {
        let url = self.url("health")?;
        self.get(url).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
