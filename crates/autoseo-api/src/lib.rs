// autoseo-api: Async Rust client for the AutoSEO Site Service

pub mod client;
pub mod error;
pub mod models;
mod sites;
pub mod transport;

pub use client::SiteClient;
pub use error::Error;
pub use models::{
    DashboardStatsResponse, GenerateSiteRequest, HealthResponse, Overview, RecentSiteRecord,
    SiteDetailRecord, SiteRecord, WireId,
};
pub use transport::{TlsMode, TransportConfig};
