//! Navigation guard and router state

use crate::routes::{self, NOT_FOUND, RouteEntry, RouteName};
use tracing::debug;

/// Outcome of the guard for a single navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(RouteName),
}

/// Runs before every navigation.
///
/// Routes that require authentication send a logged-out visitor to the
/// login page; everything else proceeds.
pub fn guard(target: &RouteEntry, logged_in: bool) -> Navigation {
    if target.meta.requires_auth && !logged_in {
        Navigation::Redirect(RouteName::Login)
    } else {
        Navigation::Proceed
    }
}

/// Tracks the committed route and applies the guard on every navigation.
///
/// For native callers; the browser shell commits routes through
/// yew-router and calls [`guard`] directly.
#[derive(Debug)]
pub struct Router {
    current: &'static RouteEntry,
    app_name: String,
}

impl Router {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            current: RouteName::Home.entry(),
            app_name: app_name.into(),
        }
    }

    pub const fn current(&self) -> &'static RouteEntry {
        self.current
    }

    /// Resolve `path`, run the guard and commit the resulting route.
    ///
    /// Unknown paths commit the not-found entry. A redirect is followed
    /// once; the login route never requires authentication.
    pub fn navigate(&mut self, path: &str, logged_in: bool) -> &'static RouteEntry {
        let target = routes::resolve(path).unwrap_or(&NOT_FOUND);

        let committed = match guard(target, logged_in) {
            Navigation::Proceed => target,
            Navigation::Redirect(name) => {
                debug!(from = target.path, to = name.path(), "Navigation redirected");
                name.entry()
            }
        };

        debug!(path = committed.path, "Navigation committed");
        self.current = committed;
        committed
    }

    /// Document title for the committed route
    pub fn title(&self) -> String {
        document_title(self.current, &self.app_name)
    }
}

/// `"<route title> - <app name>"`
pub fn document_title(entry: &RouteEntry, app_name: &str) -> String {
    format!("{} - {app_name}", entry.meta.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::ROUTES;

    #[test]
    fn test_protected_route_redirects_when_logged_out() {
        for entry in ROUTES.iter().filter(|e| e.meta.requires_auth) {
            assert_eq!(
                guard(entry, false),
                Navigation::Redirect(RouteName::Login),
                "{}",
                entry.path
            );
        }
    }

    #[test]
    fn test_logged_in_never_redirects() {
        for entry in &ROUTES {
            assert_eq!(guard(entry, true), Navigation::Proceed, "{}", entry.path);
        }
    }

    #[test]
    fn test_public_routes_proceed_when_logged_out() {
        for entry in ROUTES.iter().filter(|e| !e.meta.requires_auth) {
            assert_eq!(guard(entry, false), Navigation::Proceed, "{}", entry.path);
        }
    }

    #[test]
    fn test_router_commits_redirect() {
        let mut router = Router::new("Insight");
        assert_eq!(router.current().name, RouteName::Home);

        let committed = router.navigate("/profile", false);
        assert_eq!(committed.name, RouteName::Login);
        assert_eq!(router.current().path, "/login");
        assert_eq!(router.title(), "登录 - Insight");

        let committed = router.navigate("/profile", true);
        assert_eq!(committed.name, RouteName::Profile);
    }

    #[test]
    fn test_router_admin_requires_login() {
        let mut router = Router::new("Insight");
        assert_eq!(router.navigate("/admin", false).name, RouteName::Login);
        assert_eq!(router.navigate("/admin", true).name, RouteName::Admin);
    }

    #[test]
    fn test_router_unknown_path() {
        let mut router = Router::new("Insight");
        assert_eq!(router.navigate("/missing", false).name, RouteName::NotFound);
        assert_eq!(router.title(), "页面不存在 - Insight");
    }
}
