// ── Core error types ──
//
// User-facing errors from autoseo-core. Consumers never see reqwest or
// serde errors directly: the `From<autoseo_api::Error>` impl translates
// transport-layer failures into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach site service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Site service timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Service errors ───────────────────────────────────────────────
    #[error("Site service rejected the request (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Site not found: {identifier}")]
    NotFound { identifier: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected response from site service: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Coarse failure taxonomy used for user-facing presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Service unreachable or timed out.
    Transport,
    /// Service answered with a non-success status.
    Service,
    /// Service answered with something we couldn't interpret.
    Malformed,
    /// Local problem: bad configuration.
    Local,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => ErrorKind::Transport,
            Self::Service { .. } | Self::NotFound { .. } => ErrorKind::Service,
            Self::MalformedResponse { .. } => ErrorKind::Malformed,
            Self::Config { .. } => ErrorKind::Local,
        }
    }

    /// Short message suitable for an inline banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConnectionFailed { .. } => "Site service unreachable".into(),
            Self::Timeout { timeout_secs } => {
                format!("Site service did not answer within {timeout_secs}s")
            }
            Self::Service { status, message } => format!("{message} (HTTP {status})"),
            other => other.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<autoseo_api::Error> for CoreError {
    fn from(err: autoseo_api::Error) -> Self {
        match err {
            autoseo_api::Error::Transport(ref e) => {
                if e.is_decode() {
                    CoreError::MalformedResponse {
                        message: e.to_string(),
                    }
                } else if let Some(status) = e.status() {
                    CoreError::Service {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            autoseo_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            autoseo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid service URL: {e}"),
            },
            autoseo_api::Error::Tls(message) => CoreError::Config { message },
            autoseo_api::Error::Service { status, message } => {
                CoreError::Service { status, message }
            }
            autoseo_api::Error::Deserialization { message, .. } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
