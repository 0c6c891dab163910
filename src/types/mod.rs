//! Payload models of the feed service.

pub mod auth;
pub mod feed;
pub mod log;
pub mod magnet;

pub use auth::*;
pub use feed::*;
pub use log::*;
pub use magnet::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Generic acknowledgement body (`{"message": ...}` or `{"error": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse a timestamp as the service renders it (RFC 2822, e.g.
/// `Tue, 15 Oct 2024 10:00:00 GMT`, or RFC 3339).
pub fn parse_server_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// Read a nullable boolean column. The service stores `NULL` for flags
/// cleared through a partial update and treats it as unset.
pub(crate) fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
