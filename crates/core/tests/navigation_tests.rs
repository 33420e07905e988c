//! Navigation driven by a live session store

use insight_core::logging::init_tracing;
use insight_core::{ClientConfig, MemoryStore, RouteName, Router, SessionStore, User};

#[test]
fn test_navigation_follows_session() {
    init_tracing("debug");

    let mut session = SessionStore::load(MemoryStore::new());
    let mut router = Router::new(ClientConfig::DEFAULT_APP_NAME);

    let entry = router.navigate("/profile", session.is_logged_in());
    assert_eq!(entry.name, RouteName::Login);
    assert_eq!(router.title(), "登录 - Insight");

    session.set_auth("tok-1", Some(User::new(1, "alice")));
    let entry = router.navigate("/profile?tab=posts", session.is_logged_in());
    assert_eq!(entry.name, RouteName::Profile);
    assert_eq!(router.title(), "个人中心 - Insight");

    // A rehydrated store keeps the visitor signed in
    let session = SessionStore::load(session.into_storage());
    assert_eq!(router.navigate("/admin", session.is_logged_in()).name, RouteName::Admin);

    let mut session = session;
    session.logout();
    assert_eq!(router.navigate("/admin/", session.is_logged_in()).name, RouteName::Login);
    assert_eq!(router.current().path, "/login");
}

#[test]
fn test_init_tracing_only_once() {
    init_tracing("info");
    assert!(!init_tracing("info"));
}
