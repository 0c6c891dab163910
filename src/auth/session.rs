use std::sync::Arc;

use crate::navigation::Route;

/// Lifecycle events of the client-side session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login stored a fresh credential.
    LoggedIn,
    /// An expired credential was replaced by a refreshed one.
    Refreshed,
    /// The credential could not be refreshed and was purged. The
    /// surrounding application should navigate to `redirect`.
    Invalidated { redirect: Route },
    /// The credential was cleared on request.
    LoggedOut,
}

/// Callback receiving [`SessionEvent`]s.
pub type SessionEventSink = Arc<dyn Fn(SessionEvent) + Send + Sync>;
