//! Typed endpoints of the feed service.
//!
//! Each method is a thin wrapper around one REST call and runs through
//! [`ApiClient::execute`](crate::client::ApiClient::execute), so every one
//! of them gets credential attachment and expiry recovery.

pub mod auth;
pub mod logs;
pub mod magnets;
pub mod rss;

pub use auth::LOGIN_PATH;
