//! feedctl: client for an RSS-to-download task service.
//!
//! The core is [`client::ApiClient`], a session-aware HTTP client: it
//! attaches the stored bearer credential to every request and, when the
//! service reports an expired token, refreshes it and retries the request
//! exactly once. When the refresh fails the credential is purged and a
//! [`auth::SessionEvent::Invalidated`] event tells the application to go
//! back to the login view.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use feedctl::prelude::*;
//!
//! # async fn example() -> feedctl::error::Result<()> {
//! let client = ApiClient::new("http://127.0.0.1:5000/api", Arc::new(MemorySessionStore::new()))?
//!     .with_event_sink(Arc::new(|event: SessionEvent| {
//!         if let SessionEvent::Invalidated { redirect } = event {
//!             eprintln!("session ended, go to {redirect}");
//!         }
//!     }));
//! client.login("admin", "secret").await?;
//! for feed in client.list_feeds().await? {
//!     println!("{} {}", feed.id, feed.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod prelude;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
