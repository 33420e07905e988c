use crate::auth::{AuthProvider, SessionHandle, use_auth};
use crate::route::Route;
use crate::views;
use insight_core::guard::document_title;
use insight_core::{ClientConfig, Navigation, RouteEntry, guard};
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub session: SessionHandle,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider session={props.session.clone()}>
                <NavBar />
                <main>
                    <Switch<Route> render={switch} />
                </main>
            </AuthProvider>
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    html! { <GuardedRoute {route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedRouteProps {
    route: Route,
}

/// Runs the navigation guard before rendering a page
#[function_component(GuardedRoute)]
fn guarded_route(props: &GuardedRouteProps) -> Html {
    let auth = use_auth();
    let entry = props.route.name().entry();
    let decision = guard(entry, auth.logged_in);

    use_effect_with((entry, decision), |(entry, decision)| {
        if *decision == Navigation::Proceed {
            set_document_title(entry);
        }
    });

    match decision {
        Navigation::Proceed => views::view(props.route),
        Navigation::Redirect(name) => {
            debug!(from = entry.path, to = name.path(), "Navigation redirected");
            html! { <Redirect<Route> to={Route::from(name)} /> }
        }
    }
}

fn set_document_title(entry: &RouteEntry) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&document_title(entry, ClientConfig::DEFAULT_APP_NAME));
    }
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let auth = use_auth();

    let links = [
        Route::Home,
        Route::Agent,
        Route::App,
        Route::Algorithms,
        Route::Community,
        Route::About,
    ];

    html! {
        <nav class="border-b px-4 py-3 flex items-center gap-4">
            <span class="font-bold">{ClientConfig::DEFAULT_APP_NAME}</span>
            { for links.iter().map(|route| html! {
                <Link<Route> to={*route}>{route.name().entry().meta.title}</Link<Route>>
            }) }
            <span class="ml-auto flex gap-4">
                if auth.logged_in {
                    <Link<Route> to={Route::Profile}>
                        { auth.user.as_ref().map_or("个人中心", |u| u.display_name()).to_string() }
                    </Link<Route>>
                } else {
                    <Link<Route> to={Route::Login}>{"登录"}</Link<Route>>
                    <Link<Route> to={Route::Register}>{"注册"}</Link<Route>>
                }
            </span>
        </nav>
    }
}
