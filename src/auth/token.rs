use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer token issued by the service.
///
/// The token has no structure this crate relies on. `Debug` output never
/// includes it.
///
/// # Example
/// ```
/// use feedctl::auth::Credential;
///
/// let credential = Credential::new("eyJhbGciOi...");
/// assert_eq!(credential.bearer(), "Bearer eyJhbGciOi...");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: Utc::now(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
