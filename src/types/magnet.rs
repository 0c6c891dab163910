use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parse_server_time;

/// A download task discovered from a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magnet {
    pub id: i64,
    pub rss_feed_id: i64,
    pub title: String,
    pub name: String,
    pub magnet_link: String,
    /// `true` once the download task finished. `null` counts as pending.
    #[serde(default, deserialize_with = "super::null_as_false")]
    pub status: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Magnet {
    pub fn timestamp_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_server_time)
    }
}
