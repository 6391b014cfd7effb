//! Configuration for the AutoSEO dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML file under the
//! platform config directory, then `AUTOSEO_`-prefixed environment
//! variables. [`Config::service_config`] turns the result into the
//! `autoseo_core` types the service and dashboard consume.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use autoseo_core::{DEFAULT_API_URL, GenerationOptions, ServiceConfig, TlsVerification};

/// Environment variable prefix. `AUTOSEO_API_URL` sets `api_url`.
pub const ENV_PREFIX: &str = "AUTOSEO_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Site Service base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds between automatic list reloads. `0` disables polling.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Deployment platform sent with generation requests.
    #[serde(default = "default_cloud_provider")]
    pub cloud_provider: String,

    /// Content tone sent with generation requests.
    #[serde(default = "default_tone")]
    pub tone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            refresh_interval_secs: default_refresh_interval(),
            insecure: false,
            ca_cert: None,
            cloud_provider: default_cloud_provider(),
            tone: default_tone(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    10
}
fn default_cloud_provider() -> String {
    GenerationOptions::default().cloud_provider
}
fn default_tone() -> String {
    GenerationOptions::default().tone
}

impl Config {
    /// Validate and convert into the service connection settings.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let base_url: url::Url = self
            .api_url
            .trim()
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("invalid URL: {}", self.api_url),
            })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("expected http or https, got '{}'", base_url.scheme()),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ServiceConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout),
            tls,
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            cloud_provider: self.cloud_provider.clone(),
            tone: self.tone.clone(),
        }
    }

    /// `None` when polling is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "autoseo", "autoseo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("autoseo");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from the canonical file path and environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` (missing file is fine) and environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
