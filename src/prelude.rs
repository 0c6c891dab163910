//! Convenience re-exports for common use.

pub use crate::auth::{
    Credential, FileSessionStore, MemorySessionStore, SessionEvent, SessionEventSink,
    SessionStore,
};
pub use crate::client::{ApiClient, ApiResponse, RequestDescriptor};
pub use crate::config::ClientConfig;
pub use crate::error::{FeedError, Result};
pub use crate::navigation::Route;
pub use crate::types::{
    FeedPatch, FeedRename, FeedUpdate, LogLevel, LogQuery, Magnet, NewFeed, RssFeed,
};
