//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 401 carrying the token-expired sentinel.
    ExpiredCredential,
    /// Any other 401/403.
    Authentication,
    /// 4xx the caller can fix.
    Client,
    Server,
    Network,
    /// Local credential storage failed.
    Session,
    Serialization,
    Configuration,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    Relogin,
    RetryWithBackoff,
    FixRequest,
    CheckConfiguration,
    CheckSessionStorage,
    ContactSupport,
}
