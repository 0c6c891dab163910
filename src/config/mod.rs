//! Configuration system (layered: code > env > defaults).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{FileSessionStore, SessionStore};
use crate::client::DEFAULT_BASE_URL;
use crate::error::{FeedError, Result};

pub const ENV_BASE_URL: &str = "FEEDCTL_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FEEDCTL_TIMEOUT_SECS";
pub const ENV_SESSION_DIR: &str = "FEEDCTL_SESSION_DIR";

/// Client configuration.
///
/// Resolution order:
/// 1. Values set in code (`with_*`, CLI flags)
/// 2. Environment variables, including a `.env` file
/// 3. Defaults: local service, transport default timeout, `~/.feedctl`
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
    session_dir: PathBuf,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("session_dir", &self.session_dir)
            .field("session_store", &self.session_store.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            session_dir: FileSessionStore::default_dir(),
            session_store: None,
        }
    }

    /// Load from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                FeedError::Configuration(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got '{raw}'"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(dir) = lookup(ENV_SESSION_DIR).filter(|v| !v.trim().is_empty()) {
            config = config.with_session_dir(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Set the service base URL. Must be an absolute http(s) URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| FeedError::Configuration(format!("invalid base URL '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedError::Configuration(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_session_dir(mut self, dir: PathBuf) -> Self {
        self.session_dir = dir;
        self
    }

    /// Use a specific store instead of the file store under `session_dir`.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// The store clients built from this config persist into.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match &self.session_store {
            Some(store) => store.clone(),
            None => Arc::new(FileSessionStore::new(self.session_dir.clone())),
        }
    }
}
