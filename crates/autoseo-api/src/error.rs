use thiserror::Error;

/// Top-level error type for the `autoseo-api` crate.
///
/// Covers every failure mode of a Site Service call: transport,
/// service-reported (non-2xx) responses, and bodies that don't decode.
/// `autoseo-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No complete response within the client's configured timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success HTTP status from the Site Service.
    #[error("Site service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The service answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Service { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_not_not_found() {
        let err = Error::Service {
            status: 422,
            message: "keyword too short".into(),
        };
        assert!(!err.is_not_found());
        assert!(!Error::Timeout { timeout_secs: 30 }.is_not_found());
    }

    #[test]
    fn not_found_is_detected_from_service_status() {
        let err = Error::Service {
            status: 404,
            message: "Site not found".into(),
        };
        assert!(err.is_not_found());
    }
}
