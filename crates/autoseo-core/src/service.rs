// ── Site Service seam ──
//
// `SiteService` is the boundary the dashboard talks to. `HttpSiteService`
// is the production implementation over `autoseo_api::SiteClient`; tests
// substitute an in-memory fake.

use std::future::Future;

use tracing::debug;

use autoseo_api::transport::{TlsMode, TransportConfig};
use autoseo_api::{GenerateSiteRequest, SiteClient};

use crate::config::{GenerationOptions, ServiceConfig, TlsVerification};
use crate::convert::sites_from_records;
use crate::error::CoreError;
use crate::model::{DashboardStats, Site, SiteDetail, SiteId};

/// A validated request to generate one site.
///
/// Only [`crate::DashboardState::begin_submit`] and [`GenerationRequest::new`]
/// construct these, so the keyword is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    keyword: String,
    options: GenerationOptions,
}

impl GenerationRequest {
    /// Build a request, trimming the keyword. Returns `None` for a blank keyword.
    pub fn new(keyword: &str, options: GenerationOptions) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }
        Some(Self {
            keyword: keyword.to_owned(),
            options,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }
}

impl From<&GenerationRequest> for GenerateSiteRequest {
    fn from(req: &GenerationRequest) -> Self {
        GenerateSiteRequest {
            keyword: req.keyword.clone(),
            cloud_provider: req.options.cloud_provider.clone(),
            tone: req.options.tone.clone(),
        }
    }
}

/// Operations the dashboard needs from the Site Service.
pub trait SiteService: Send + Sync {
    /// Current collection of sites, in service order.
    fn list_sites(&self) -> impl Future<Output = Result<Vec<Site>, CoreError>> + Send;

    /// Ask the service to generate a site.
    ///
    /// Resolves to the created site when the service returned a usable record.
    fn generate_site(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Option<Site>, CoreError>> + Send;

    fn get_site(&self, id: &SiteId)
    -> impl Future<Output = Result<SiteDetail, CoreError>> + Send;

    fn dashboard_stats(&self) -> impl Future<Output = Result<DashboardStats, CoreError>> + Send;

    /// `true` when the service reports itself healthy.
    fn health(&self) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

// ── HTTP implementation ────────────────────────────────────────────

/// [`SiteService`] backed by the Site Service's REST API.
#[derive(Clone)]
pub struct HttpSiteService {
    client: SiteClient,
}

impl HttpSiteService {
    pub fn new(config: &ServiceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = SiteClient::new(config.base_url.clone(), &transport)?;
        Ok(Self { client })
    }

    pub fn base_url(&self) -> &url::Url {
        self.client.base_url()
    }
}

impl SiteService for HttpSiteService {
    async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
        let records = self.client.list_sites().await?;
        let sites = sites_from_records(records);
        debug!(count = sites.len(), "loaded sites");
        Ok(sites)
    }

    async fn generate_site(&self, request: &GenerationRequest) -> Result<Option<Site>, CoreError> {
        let body = GenerateSiteRequest::from(request);
        let created = self.client.generate_site(&body).await?;
        Ok(created.and_then(|rec| Site::try_from(rec).ok()))
    }

    async fn get_site(&self, id: &SiteId) -> Result<SiteDetail, CoreError> {
        let record = self
            .client
            .get_site(&id.to_string())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::NotFound {
                        identifier: id.to_string(),
                    }
                } else {
                    CoreError::from(e)
                }
            })?;
        SiteDetail::try_from(record)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        let stats = self.client.dashboard_stats().await?;
        Ok(DashboardStats::from(stats))
    }

    async fn health(&self) -> Result<bool, CoreError> {
        let health = self.client.health().await?;
        Ok(health.is_healthy())
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keywords_build_no_request() {
        assert!(GenerationRequest::new("", GenerationOptions::default()).is_none());
        assert!(GenerationRequest::new("   \t", GenerationOptions::default()).is_none());
    }

    #[test]
    fn wire_request_carries_defaults() {
        let req = GenerationRequest::new("  best coffee makers ", GenerationOptions::default());
        let wire = req.as_ref().map(GenerateSiteRequest::from);
        assert_eq!(
            wire,
            Some(GenerateSiteRequest {
                keyword: "best coffee makers".into(),
                cloud_provider: "aws".into(),
                tone: "professional".into(),
            })
        );
    }
}
