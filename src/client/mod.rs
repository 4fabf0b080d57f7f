//! HTTP client for the Sport Administration backend.
//!
//! [`ApiClient`] owns the request machinery: base-URL resolution, bearer
//! attachment, body serialization, and response/error normalization. The
//! per-resource accessors ([`AuthApi`], [`EventsApi`], [`PostsApi`],
//! [`RegistrationsApi`]) layer typed endpoints on top of it.
//!
//! Every call is fire-once: no retries, no timeouts, no cancellation.
//! Failures surface to the caller as [`Error`] values.

mod auth;
mod events;
mod posts;
mod registrations;

pub use auth::AuthApi;
pub use events::EventsApi;
pub use posts::PostsApi;
pub use registrations::RegistrationsApi;

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::token::TokenStore;

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    /// No body.
    None,
    /// JSON-serialized body; sets `Content-Type: application/json` unless
    /// the caller supplied an override.
    Json(Value),
    /// Raw multipart form; content type is set by the form encoder.
    Form(reqwest::multipart::Form),
}

/// HTTP client for the API.
///
/// Cheap to clone; the underlying connection pool and token store handle are
/// shared.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sportadm_client::{ApiClient, MemoryTokenStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://localhost:8081", Arc::new(MemoryTokenStore::new()))?;
/// let events = client.events().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    /// Create a new client against `base_url`, reading the bearer credential
    /// from `tokens` on every request.
    pub fn new(base_url: impl AsRef<str>, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_client(base_url, tokens, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        tokens: Arc<dyn TokenStore>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL {base_url} cannot carry paths"
            )));
        }
        Ok(Self {
            base_url,
            http,
            tokens,
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Handle to the token store this client reads from.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the Auth API.
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Access the Events API.
    #[must_use]
    pub fn events(&self) -> EventsApi<'_> {
        EventsApi { client: self }
    }

    /// Access the event-scoped Posts API.
    #[must_use]
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi { client: self }
    }

    /// Access the Registrations API.
    #[must_use]
    pub fn registrations(&self) -> RegistrationsApi<'_> {
        RegistrationsApi { client: self }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request core
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve an endpoint URL from path segments and query pairs.
    /// Segments are percent-encoded individually.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// Perform one request and normalize the response.
    ///
    /// Adds `Accept: application/json` and, when the token store holds a
    /// credential and the caller did not set one, `Authorization: Bearer`.
    /// Returns `Ok(None)` for 204 or an empty body, a parsed [`Value`] for
    /// JSON responses, and `Value::String` for anything else.
    ///
    /// Non-2xx statuses become [`Error::Api`]; a 401 additionally clears the
    /// token store before the error propagates, so the next session snapshot
    /// re-evaluates as anonymous.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Option<Value>> {
        let caller_set_auth = headers.contains_key(header::AUTHORIZATION);
        let caller_set_content_type = headers.contains_key(header::CONTENT_TYPE);

        let mut rb = self
            .http
            .request(method.clone(), url.clone())
            .header(header::ACCEPT, HeaderValue::from_static("application/json"));

        match body {
            RequestBody::None => {}
            RequestBody::Json(value) => {
                if caller_set_content_type {
                    rb = rb.body(serde_json::to_vec(&value)?);
                } else {
                    rb = rb.json(&value);
                }
            }
            RequestBody::Form(form) => rb = rb.multipart(form),
        }

        if !caller_set_auth {
            if let Some(token) = self.tokens.get() {
                rb = rb.bearer_auth(token);
            }
        }
        rb = rb.headers(headers);

        tracing::debug!(%method, url = %url, "api request");
        let response = rb.send().await?;
        self.normalize(response).await
    }

    async fn normalize(&self, response: reqwest::Response) -> Result<Option<Value>> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = response.text().await?;

        let parsed = if text.is_empty() {
            None
        } else if is_json {
            // A JSON content type with an unparseable body degrades to text.
            serde_json::from_str(&text)
                .ok()
                .or_else(|| Some(Value::String(text.clone())))
        } else {
            Some(Value::String(text.clone()))
        };

        if status == StatusCode::UNAUTHORIZED {
            // The credential is presumed invalid or expired.
            tracing::debug!("401 response, clearing stored credential");
            self.tokens.clear();
        }

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| {
                    v.get("message")
                        .or_else(|| v.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .or_else(|| {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("HTTP error")
                        .to_string()
                });
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(parsed)
    }

    // Typed convenience wrappers used by the accessors.

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let value = self
            .request(Method::GET, url, RequestBody::None, HeaderMap::new())
            .await?;
        Self::deserialize(value)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let value = self
            .request(
                method,
                url,
                RequestBody::Json(serde_json::to_value(body)?),
                HeaderMap::new(),
            )
            .await?;
        Self::deserialize(value)
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl serde::Serialize>,
    ) -> Result<()> {
        let body = match body {
            Some(b) => RequestBody::Json(serde_json::to_value(b)?),
            None => RequestBody::None,
        };
        self.request(method, url, body, HeaderMap::new()).await?;
        Ok(())
    }

    fn deserialize<T: DeserializeOwned>(value: Option<Value>) -> Result<T> {
        Ok(serde_json::from_value(value.unwrap_or(Value::Null))?)
    }
}
