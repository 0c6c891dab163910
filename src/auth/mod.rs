//! Credential storage and session lifecycle events.

pub mod error;
pub mod session;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use session::{SessionEvent, SessionEventSink};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, CREDENTIAL_KEY};
pub use token::Credential;
