// ── Runtime service configuration ──
//
// These types describe *how* to reach the Site Service and what to send
// with a generation request. They never touch disk: `autoseo-config`
// (or a test) builds them and hands them in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Base URL used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout used when nothing overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging backends).
    DangerAcceptInvalid,
}

/// Connection settings for the Site Service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub tls: TlsVerification,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
        }
    }
}

/// Options sent alongside every keyword in a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Target deployment platform identifier (e.g. `aws`, `gcp`, `azure`).
    pub cloud_provider: String,
    /// Desired content voice.
    pub tone: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            cloud_provider: "aws".into(),
            tone: "professional".into(),
        }
    }
}
