//! Error types for feedctl.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::auth::AuthError;
use crate::client::TOKEN_EXPIRED_MESSAGE;

/// Longest slice of a raw response body kept in an error.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Primary error type for all feedctl operations.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx answer from the service. `message` is the `message` field of
    /// the JSON error body, `detail` a printable summary.
    #[error("API error (status {status}): {detail}")]
    Api {
        status: u16,
        message: Option<String>,
        detail: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] AuthError),

    #[error("Stored credential is not a valid header value: {0}")]
    InvalidCredential(String),

    #[error("No token in {0} response")]
    MissingToken(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FeedError {
    /// Build an API error from a failed response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let message = field("message");
        let detail = message
            .clone()
            .or_else(|| field("error"))
            .unwrap_or_else(|| truncate_body(body));
        Self::Api {
            status,
            message,
            detail,
        }
    }

    /// Create an API error with a server message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Api {
            status,
            detail: message.clone(),
            message: Some(message),
        }
    }

    /// HTTP status, if this error came from the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this is the one failure the client recovers from by refreshing.
    pub fn is_token_expired(&self) -> bool {
        matches!(
            self,
            Self::Api { status: 401, message: Some(message), .. } if message == TOKEN_EXPIRED_MESSAGE
        )
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Api { status, .. } => match status {
                401 if self.is_token_expired() => ErrorCategory::ExpiredCredential,
                401 | 403 => ErrorCategory::Authentication,
                400..=499 => ErrorCategory::Client,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Unknown,
            },
            Self::Network(_) => ErrorCategory::Network,
            Self::Session(_) | Self::InvalidCredential(_) => ErrorCategory::Session,
            Self::MissingToken(_) => ErrorCategory::Authentication,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::InvalidArgument(_) => ErrorCategory::Client,
        }
    }

    /// Whether this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::ExpiredCredential | ErrorCategory::Authentication => {
                RecoverySuggestion::Relogin
            }
            ErrorCategory::Network | ErrorCategory::Server => RecoverySuggestion::RetryWithBackoff,
            ErrorCategory::Client => RecoverySuggestion::FixRequest,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Session => RecoverySuggestion::CheckSessionStorage,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FeedError>;
