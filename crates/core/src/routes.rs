//! Static route table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a view. The web shell maps each name to a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteName {
    Home,
    Agent,
    App,
    Algorithms,
    About,
    Community,
    Login,
    Register,
    Profile,
    Admin,
    NotFound,
}

impl RouteName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Agent => "agent",
            Self::App => "app",
            Self::Algorithms => "algorithms",
            Self::About => "about",
            Self::Community => "community",
            Self::Login => "login",
            Self::Register => "register",
            Self::Profile => "profile",
            Self::Admin => "admin",
            Self::NotFound => "not_found",
        }
    }

    /// Table entry for this name
    pub fn entry(self) -> &'static RouteEntry {
        ROUTES
            .iter()
            .find(|entry| entry.name == self)
            .unwrap_or(&NOT_FOUND)
    }

    pub fn path(self) -> &'static str {
        self.entry().path
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-route metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub requires_auth: bool,
}

impl RouteMeta {
    const fn public(title: &'static str) -> Self {
        Self {
            title,
            requires_auth: false,
        }
    }

    const fn protected(title: &'static str) -> Self {
        Self {
            title,
            requires_auth: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: RouteName,
    pub meta: RouteMeta,
}

impl RouteEntry {
    const fn new(path: &'static str, name: RouteName, meta: RouteMeta) -> Self {
        Self { path, name, meta }
    }
}

pub static ROUTES: [RouteEntry; 10] = [
    RouteEntry::new("/", RouteName::Home, RouteMeta::public("项目概览")),
    RouteEntry::new("/agent", RouteName::Agent, RouteMeta::public("智能助理")),
    RouteEntry::new("/app", RouteName::App, RouteMeta::public("数据探索")),
    RouteEntry::new(
        "/algorithms",
        RouteName::Algorithms,
        RouteMeta::public("算法文库"),
    ),
    RouteEntry::new("/about", RouteName::About, RouteMeta::public("关于项目")),
    RouteEntry::new(
        "/community",
        RouteName::Community,
        RouteMeta::public("社区广场"),
    ),
    RouteEntry::new("/login", RouteName::Login, RouteMeta::public("登录")),
    RouteEntry::new("/register", RouteName::Register, RouteMeta::public("注册")),
    RouteEntry::new(
        "/profile",
        RouteName::Profile,
        RouteMeta::protected("个人中心"),
    ),
    RouteEntry::new("/admin", RouteName::Admin, RouteMeta::protected("管理后台")),
];

/// Fallback for paths outside the table
pub static NOT_FOUND: RouteEntry =
    RouteEntry::new("/404", RouteName::NotFound, RouteMeta::public("页面不存在"));

/// Look up the entry for a path.
///
/// Query strings, fragments and a trailing slash are ignored.
pub fn resolve(path: &str) -> Option<&'static RouteEntry> {
    let path = normalize(path);
    ROUTES.iter().find(|entry| entry.path == path)
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}
