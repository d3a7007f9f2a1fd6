//! Gallery API client.
//!
//! Low-level HTTP client holding the base address and the transport.
//! Resource reads are implemented via traits on the model types.

use std::env;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, Result};

/// Base address used when `PUBLIC_API_BASE` is unset or empty.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable holding the API base address.
pub const API_BASE_ENV: &str = "PUBLIC_API_BASE";

const USER_AGENT: &str = concat!("mediaboard/", env!("CARGO_PKG_VERSION"));

/// A request handed to a [`Fetch`] transport.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
}

impl FetchRequest {
    /// A GET request for `url`.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }
}

/// A fully buffered response returned by a [`Fetch`] transport.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// The fetch primitive: how bytes move over the wire.
///
/// The default implementation is [`ReqwestFetch`]. Tests and embedders can
/// supply their own to observe or stub requests.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Perform one request and buffer the response.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

/// [`Fetch`] implementation backed by a `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    http: reqwest::Client,
}

impl ReqwestFetch {
    /// Build the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(ApiError::Http)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let response = self
            .http
            .request(request.method, request.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Http)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Http)?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Client configuration: normalized base address plus transport.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    fetch: Arc<dyn Fetch>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Configuration targeting `base_url` with the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the default transport
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            fetch: Arc::new(ReqwestFetch::new()?),
        })
    }

    /// Configuration from `PUBLIC_API_BASE`, falling back to [`DEFAULT_API_BASE`].
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_API_BASE` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        Self::new(&resolve_base_url(env::var(API_BASE_ENV).ok()))
    }

    /// Replace the transport.
    #[must_use]
    pub fn with_fetch(mut self, fetch: impl Fetch + 'static) -> Self {
        self.fetch = Arc::new(fetch);
        self
    }

    /// The normalized base address.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Parse a base address, adding a trailing `/` so relative joins keep any path prefix.
fn parse_base_url(base_url: &str) -> Result<Url> {
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{base_url}/"))?)
    }
}

/// Pick the base address: a non-empty configured value, else the default.
pub fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Typed client for the gallery API.
///
/// This struct is cheaply cloneable; clones share the same transport.
/// Configuration is fixed at construction.
///
/// # Example
///
/// ```no_run
/// use mediaboard::{ApiClient, ClientConfig};
///
/// # fn example() -> mediaboard::Result<()> {
/// // Base address from PUBLIC_API_BASE, or http://localhost:8000
/// let client = ApiClient::from_env()?;
///
/// // Or configure manually
/// let client = ApiClient::new(ClientConfig::new("https://api.example.com")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    fetch: Arc<dyn Fetch>,
    base_url: Arc<Url>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from a configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            fetch: config.fetch,
            base_url: Arc::new(config.base_url),
        }
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_API_BASE` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Create a client for `base_url` with the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self::new(ClientConfig::new(base_url)?))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) and decode the JSON payload.
    ///
    /// A `null` or empty body yields `Ok(None)`.
    #[tracing::instrument(skip(self), fields(base = %self.base_url))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.base_url.join(path)?;
        let response = self.fetch.fetch(FetchRequest::get(url)).await?;
        let body = Self::check_response(response)?;
        decode_payload(&body)
    }

    /// Check response status and convert errors.
    fn check_response(response: FetchResponse) -> Result<Vec<u8>> {
        if response.status.is_success() {
            return Ok(response.body);
        }

        tracing::debug!(status = %response.status, "request failed");
        Err(ApiError::Status {
            status: response.status.as_u16(),
            message: extract_error_message(&response.body, response.status),
        })
    }
}

/// Decode a response body, treating `null` and an empty body as absent data.
fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}

/// Extract an error message from a failed response body.
fn extract_error_message(body: &[u8], status: StatusCode) -> String {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return format!("HTTP {status}");
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) {
        for field in ["detail", "message", "error"] {
            if let Some(msg) = json.get(field).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }

    text.into_owned()
}
