//! Client-side route table and authentication guard.
//!
//! Routes are plain data: resolving a path never renders anything, it only
//! decides which view the surrounding application should show.

use std::fmt;

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";

/// A view the application can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Feed list, `/`.
    Feeds,
    /// Login form, `/login`.
    Login,
    /// Magnets of one feed, `/magnets/:rssFeedId`. The segment is kept
    /// verbatim; see [`Route::feed_id`].
    Magnets { rss_feed_id: String },
    /// Application log viewer, `/logs`.
    Logs,
    /// Login history, `/login-logs`.
    LoginLogs,
    /// Anything unmatched.
    NotFound,
}

impl Route {
    /// Match a path (query string and fragment ignored) against the table.
    pub fn resolve(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Feeds,
            [one] if one.eq_ignore_ascii_case("login") => Self::Login,
            [one] if one.eq_ignore_ascii_case("logs") => Self::Logs,
            [one] if one.eq_ignore_ascii_case("login-logs") => Self::LoginLogs,
            [first, id] if first.eq_ignore_ascii_case("magnets") => Self::Magnets {
                rss_feed_id: (*id).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// Route name as used by the view layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Feeds => "RSSFeeds",
            Self::Login => "Login",
            Self::Magnets { .. } => "MagnetManager",
            Self::Logs => "LogViewer",
            Self::LoginLogs => "LoginLogs",
            Self::NotFound => "NotFound",
        }
    }

    /// Canonical path for this route. `NotFound` has none and maps to `/404`.
    pub fn path(&self) -> String {
        match self {
            Self::Feeds => "/".to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Magnets { rss_feed_id } => format!("/magnets/{rss_feed_id}"),
            Self::Logs => "/logs".to_string(),
            Self::LoginLogs => "/login-logs".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Numeric feed id of a magnets route, if the segment is one.
    pub fn feed_id(&self) -> Option<i64> {
        match self {
            Self::Magnets { rss_feed_id } => rss_feed_id.parse().ok(),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Feeds | Self::Magnets { .. } | Self::Logs | Self::LoginLogs
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decide where navigation to `target` actually lands.
pub fn guard(target: Route, has_credential: bool) -> Route {
    if target.requires_auth() && !has_credential {
        tracing::debug!(target = %target, "redirecting unauthenticated navigation to login");
        Route::Login
    } else {
        target
    }
}

/// Resolve `path` and apply [`guard`].
pub fn navigate(path: &str, has_credential: bool) -> Route {
    guard(Route::resolve(path), has_credential)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnets(id: &str) -> Route {
        Route::Magnets {
            rss_feed_id: id.to_string(),
        }
    }

    #[test]
    fn resolves_static_routes() {
        assert_eq!(Route::resolve("/"), Route::Feeds);
        assert_eq!(Route::resolve(""), Route::Feeds);
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/logs/"), Route::Logs);
        assert_eq!(Route::resolve("/login-logs?x=1"), Route::LoginLogs);
    }

    #[test]
    fn resolves_magnets_with_feed_id() {
        let route = Route::resolve("/magnets/42");
        assert_eq!(route, magnets("42"));
        assert_eq!(route.feed_id(), Some(42));
        assert_eq!(Route::resolve("/magnets"), Route::NotFound);
    }

    #[test]
    fn magnets_accepts_any_segment() {
        let route = navigate("/magnets/abc", true);
        assert_eq!(route, magnets("abc"));
        assert_eq!(route.name(), "MagnetManager");
        assert_eq!(route.feed_id(), None);
        assert_eq!(navigate("/magnets/abc", false), Route::Login);
    }

    #[test]
    fn unmatched_paths_are_not_found() {
        assert_eq!(Route::resolve("/settings"), Route::NotFound);
        assert_eq!(Route::resolve("/logs/extra/segments"), Route::NotFound);
    }

    #[test]
    fn guard_redirects_protected_routes_without_credential() {
        assert_eq!(navigate("/logs", false), Route::Login);
        assert_eq!(navigate("/magnets/3", false), Route::Login);
        assert_eq!(navigate("/magnets/3", true), magnets("3"));
    }

    #[test]
    fn guard_leaves_public_routes_alone() {
        assert_eq!(navigate("/login", false), Route::Login);
        assert_eq!(navigate("/nowhere", false), Route::NotFound);
    }

    #[test]
    fn paths_round_trip_through_resolve() {
        for route in [
            Route::Feeds,
            Route::Login,
            magnets("7"),
            Route::Logs,
            Route::LoginLogs,
        ] {
            assert_eq!(Route::resolve(&route.path()), route);
        }
    }
}
