// Hand-crafted async HTTP client for the Vellum REST API.
//
// Base path: /v1/
// Auth: X_API_KEY header

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

/// Production endpoint used when the caller supplies no override.
pub const DEFAULT_BASE_URL: &str = "https://api.vellum.ai";

const API_KEY_HEADER: &str = "X_API_KEY";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Vellum REST API.
///
/// Stateless apart from the underlying connection pool: every method is one
/// HTTP exchange, with no retries.
#[derive(Debug, Clone)]
pub struct VellumClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl VellumClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X_API_KEY` as a sensitive default header on every request.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| Error::InvalidApiKeyHeader(e.to_string()))?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            timeout: transport.timeout,
        })
    }

    /// Build a client without credentials.
    ///
    /// Useful for offline work (schema dumps, validation) where no request
    /// is ever sent; any call that is made will be rejected with HTTP 401.
    pub fn anonymous(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(HeaderMap::new())?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            timeout: TransportConfig::default().timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(|e| self.send_error(e))?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        self.handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        self.handle_response(resp).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    fn send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.send_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.detail)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.clone()
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
            body,
        }
    }

    // ── Document indexes ─────────────────────────────────────────────

    pub async fn create_document_index(
        &self,
        body: &types::DocumentIndexCreateRequest,
    ) -> Result<types::DocumentIndexRead, Error> {
        self.post(&["v1", "document-indexes"], body).await
    }

    /// Retrieve by id or by the workspace-unique name.
    pub async fn retrieve_document_index(
        &self,
        id_or_name: &str,
    ) -> Result<types::DocumentIndexRead, Error> {
        self.get(&["v1", "document-indexes", id_or_name]).await
    }

    pub async fn partial_update_document_index(
        &self,
        id: &str,
        body: &types::PatchedDocumentIndexUpdateRequest,
    ) -> Result<types::DocumentIndexRead, Error> {
        self.patch(&["v1", "document-indexes", id], body).await
    }

    pub async fn destroy_document_index(&self, id: &str) -> Result<(), Error> {
        self.delete(&["v1", "document-indexes", id]).await
    }

    // ── ML models ────────────────────────────────────────────────────

    pub async fn create_ml_model(
        &self,
        body: &types::MlModelCreateRequest,
    ) -> Result<types::MlModelRead, Error> {
        self.post(&["v1", "ml-models"], body).await
    }

    /// Retrieve by id or by the workspace-unique name.
    pub async fn retrieve_ml_model(&self, id_or_name: &str) -> Result<types::MlModelRead, Error> {
        self.get(&["v1", "ml-models", id_or_name]).await
    }

    pub async fn partial_update_ml_model(
        &self,
        id: &str,
        body: &types::PatchedMlModelUpdateRequest,
    ) -> Result<types::MlModelRead, Error> {
        self.patch(&["v1", "ml-models", id], body).await
    }
}
