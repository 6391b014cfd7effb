// Site Service HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status classification and
// JSON decoding. Endpoint methods live in `sites.rs` as inherent methods to
// keep this module focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the AutoSEO Site Service.
///
/// Explicitly constructed and cheap to clone (`reqwest::Client` is an
/// `Arc` internally), so it can be handed to background tasks.
#[derive(Debug, Clone)]
pub struct SiteClient {
    http: reqwest::Client,
    base_url: Url,
    /// Known only when this crate built the `reqwest::Client`.
    timeout: Option<Duration>,
}

impl SiteClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `http://localhost:8000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: Some(transport.timeout),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: None,
        }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a service path: `{base}/{path}`.
    ///
    /// A path prefix on the base URL (e.g. a reverse proxy mount at
    /// `https://host/autoseo`) is preserved.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let body = read_body(resp).await.map_err(|e| self.classify(e))?;
        decode(&body)
    }

    /// Send a POST request with a JSON body and return the raw response body.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        read_body(resp).await.map_err(|e| self.classify(e))
    }

    // ── Error classification ─────────────────────────────────────────

    /// Name the configured limit when reqwest gave up waiting.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        match self.timeout {
            Some(limit) if err.is_timeout() => Error::Timeout {
                timeout_secs: limit.as_secs(),
            },
            _ => Error::Transport(err),
        }
    }

    fn classify(&self, err: Error) -> Error {
        match err {
            Error::Transport(e) => self.transport_error(e),
            other => other,
        }
    }
}

/// Check the status and read the body as text.
///
/// Any 2xx status is success. Anything else becomes `Error::Service`,
/// carrying FastAPI's `detail` message when the body has one.
async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    trace!(%status, "response received");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.message())
            .unwrap_or_else(|| {
                let preview = preview(&body);
                if preview.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned()
                } else {
                    preview
                }
            });
        return Err(Error::Service {
            status: status.as_u16(),
            message,
        });
    }

    resp.text().await.map_err(Error::Transport)
}

/// Decode a JSON body, keeping a preview of what failed to parse.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> SiteClient {
        SiteClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let c = client("http://localhost:8000/");
        assert_eq!(
            c.url("/api/sites").unwrap().as_str(),
            "http://localhost:8000/api/sites"
        );
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("https://example.com/autoseo");
        assert_eq!(
            c.url("api/sites/generate").unwrap().as_str(),
            "https://example.com/autoseo/api/sites/generate"
        );
    }

    #[test]
    fn decode_failure_carries_body() {
        let result: Result<Vec<u8>, Error> = decode("not json");
        match result {
            Err(Error::Deserialization { body, .. }) => assert_eq!(body, "not json"),
            other => panic!("expected Deserialization error, got: {other:?}"),
        }
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(BODY_PREVIEW_CHARS + 10);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_CHARS);
    }
}
