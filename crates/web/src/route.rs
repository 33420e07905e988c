//! Browser routes

use insight_core::RouteName;
use yew_router::prelude::*;

/// Paths mirror `insight_core::ROUTES`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/agent")]
    Agent,
    #[at("/app")]
    App,
    #[at("/algorithms")]
    Algorithms,
    #[at("/about")]
    About,
    #[at("/community")]
    Community,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/profile")]
    Profile,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub const fn name(self) -> RouteName {
        match self {
            Self::Home => RouteName::Home,
            Self::Agent => RouteName::Agent,
            Self::App => RouteName::App,
            Self::Algorithms => RouteName::Algorithms,
            Self::About => RouteName::About,
            Self::Community => RouteName::Community,
            Self::Login => RouteName::Login,
            Self::Register => RouteName::Register,
            Self::Profile => RouteName::Profile,
            Self::Admin => RouteName::Admin,
            Self::NotFound => RouteName::NotFound,
        }
    }
}

impl From<RouteName> for Route {
    fn from(name: RouteName) -> Self {
        match name {
            RouteName::Home => Self::Home,
            RouteName::Agent => Self::Agent,
            RouteName::App => Self::App,
            RouteName::Algorithms => Self::Algorithms,
            RouteName::About => Self::About,
            RouteName::Community => Self::Community,
            RouteName::Login => Self::Login,
            RouteName::Register => Self::Register,
            RouteName::Profile => Self::Profile,
            RouteName::Admin => Self::Admin,
            RouteName::NotFound => Self::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::ROUTES;

    #[test]
    fn test_paths_match_route_table() {
        for entry in &ROUTES {
            let route = Route::from(entry.name);
            assert_eq!(route.to_path(), entry.path);
            assert_eq!(route.name(), entry.name);
            assert_eq!(Route::recognize(entry.path), Some(route));
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::recognize("/missing"), Some(Route::NotFound));
        assert_eq!(Route::NotFound.name(), RouteName::NotFound);
    }
}
