use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parse_server_time;

/// An RSS subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Absent means the column default (`true`); `null` means off, which is
    /// how the service's scheduler reads it.
    #[serde(default = "default_should_update", deserialize_with = "super::null_as_false")]
    pub should_update: bool,
}

fn default_should_update() -> bool {
    true
}

impl RssFeed {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.as_deref().and_then(parse_server_time)
    }
}

/// Body of `POST /rss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeed {
    pub name: String,
    pub url: String,
}

impl NewFeed {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Answer to `POST /rss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCreated {
    #[serde(default)]
    pub message: Option<String>,
    pub feed_id: i64,
}

/// Body of `PUT /rss/{id}`: full replacement of the editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedUpdate {
    pub name: String,
    pub url: String,
    pub should_update: bool,
}

/// Body of `PATCH /rss/{id}`. Unset fields are not sent.
///
/// ```
/// use feedctl::types::FeedPatch;
///
/// let patch = FeedPatch::builder().should_update(false).build();
/// assert!(!patch.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct FeedPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_update: Option<bool>,
}

impl FeedPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.should_update.is_none()
    }
}

/// Body of `PATCH /rss/{id}/rename`. The server also renames the
/// download folder from `old_name` to `new_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRename {
    pub old_name: String,
    pub new_name: String,
}
