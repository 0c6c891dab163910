//! Session-aware HTTP client.
//!
//! Every call goes through the same exchange:
//!
//! 1. **Send**: attach `Authorization: Bearer <credential>` when one is
//!    stored, then dispatch.
//! 2. **Refresh**: only when the answer is 401 with the
//!    [`TOKEN_EXPIRED_MESSAGE`] sentinel and the descriptor has not been
//!    retried yet. `POST /auth/refresh` is issued once; a new token is
//!    persisted and written onto the original descriptor. If the refresh
//!    fails, the credential is purged, [`SessionEvent::Invalidated`] is
//!    emitted, and the original rejection is returned.
//! 3. **Resend**: the original descriptor goes out once more and its
//!    outcome is final.
//!
//! Concurrent expiries each run their own refresh; the store is last
//! writer wins.

pub mod request;

pub use request::{ApiResponse, RequestDescriptor};

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::{Credential, SessionEvent, SessionEventSink, SessionStore, CREDENTIAL_KEY};
use crate::config::ClientConfig;
use crate::error::{FeedError, Result};
use crate::navigation::{self, Route};

/// Server message that marks a 401 as recoverable by refreshing.
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token has expired!";

/// Endpoint that trades the current credential for a new one.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Base URL of a locally running service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Client for the feed service.
///
/// Clone is cheap: the reqwest client, the store, and the event sink are
/// all reference counted.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use feedctl::auth::MemorySessionStore;
/// use feedctl::client::ApiClient;
///
/// # async fn example() -> feedctl::error::Result<()> {
/// let client = ApiClient::new("http://127.0.0.1:5000/api", Arc::new(MemorySessionStore::new()))?;
/// client.login("admin", "hunter2").await?;
/// let feeds = client.list_feeds().await?;
/// println!("{} feeds", feeds.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    event_sink: Option<SessionEventSink>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("store", &"..")
            .field("event_sink", &self.event_sink.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Steps of one logical request.
enum Exchange {
    Send(RequestDescriptor),
    Refresh {
        request: RequestDescriptor,
        failure: FeedError,
    },
    Resend(RequestDescriptor),
}

impl ApiClient {
    /// Create a client with default transport settings.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self::with_http_client(http, base_url, store))
    }

    /// Create a client on top of an existing reqwest client.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            event_sink: None,
        }
    }

    /// Create a client from configuration, persisting the credential on disk.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(
            builder.build()?,
            config.base_url(),
            config.session_store(),
        ))
    }

    /// Subscribe to session lifecycle events.
    pub fn with_event_sink(mut self, sink: SessionEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Currently stored credential.
    pub fn credential(&self) -> Result<Option<Credential>> {
        Ok(self.store.load(CREDENTIAL_KEY)?)
    }

    /// Whether a credential is stored. Store failures count as absent.
    pub fn has_credential(&self) -> bool {
        matches!(self.store.load(CREDENTIAL_KEY), Ok(Some(_)))
    }

    /// Resolve a client-side path through the authentication guard.
    pub fn navigate(&self, path: &str) -> Route {
        navigation::navigate(path, self.has_credential())
    }

    /// Run a request through the session-aware exchange.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<ApiResponse> {
        let mut state = Exchange::Send(request);
        loop {
            state = match state {
                Exchange::Send(mut request) => {
                    self.authorize(&mut request)?;
                    match self.dispatch(&request).await {
                        Ok(response) => return Ok(response),
                        Err(failure) if failure.is_token_expired() && !request.is_retried() => {
                            Exchange::Refresh { request, failure }
                        }
                        Err(failure) => return Err(failure),
                    }
                }
                Exchange::Refresh {
                    mut request,
                    failure,
                } => match self.renew(&mut request).await {
                    Ok(()) => {
                        request.mark_retried();
                        Exchange::Resend(request)
                    }
                    Err(refresh_error) => {
                        warn!(
                            path = %request.path,
                            error = %refresh_error,
                            "credential refresh failed, invalidating session"
                        );
                        self.invalidate_session();
                        return Err(failure);
                    }
                },
                Exchange::Resend(request) => return self.dispatch(&request).await,
            };
        }
    }

    /// Run a request and deserialize its body.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        self.execute(request).await?.into_json()
    }

    /// Remember a credential issued by the service.
    pub(crate) fn persist(&self, token: &str) -> Result<()> {
        self.store.save(CREDENTIAL_KEY, &Credential::new(token))?;
        Ok(())
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }

    /// Pre-send hook.
    fn authorize(&self, request: &mut RequestDescriptor) -> Result<()> {
        if let Some(credential) = self.store.load(CREDENTIAL_KEY)? {
            request.set_bearer(&credential.token)?;
        }
        Ok(())
    }

    /// Obtain a new token and point `request` at it.
    async fn renew(&self, request: &mut RequestDescriptor) -> Result<()> {
        let token = self.refresh_credential().await?;
        request.set_bearer(&token)?;
        self.persist(&token)?;
        info!(path = %request.path, "credential refreshed, retrying request");
        self.emit(SessionEvent::Refreshed);
        Ok(())
    }

    /// `POST /auth/refresh`. Authorized like any request but never recovered.
    async fn refresh_credential(&self) -> Result<String> {
        let mut request = RequestDescriptor::post(REFRESH_PATH);
        self.authorize(&mut request)?;
        let response = self.dispatch(&request).await?;
        response
            .field("token")
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(FeedError::MissingToken("refresh"))
    }

    fn invalidate_session(&self) {
        if let Err(err) = self.store.clear(CREDENTIAL_KEY) {
            warn!(error = %err, "failed to clear stored credential");
        }
        self.emit(SessionEvent::Invalidated {
            redirect: Route::Login,
        });
    }

    async fn dispatch(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method,
            path = %request.path,
            authorized = request.authorization().is_some(),
            retried = request.is_retried(),
            "sending request"
        );
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), path = %request.path, "request rejected");
            return Err(FeedError::from_response(status.as_u16(), &text));
        }

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
