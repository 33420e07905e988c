mod app;
mod auth;
mod config;
mod logging;
mod redirect;
mod route;
mod storage;
mod views;

use app::{App, AppProps};

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    let config = config::client_config();
    match auth::SessionHandle::init(&config) {
        Ok(session) => {
            yew::Renderer::<App>::with_props(AppProps { session }).render();
        }
        Err(e) => tracing::error!(error = %e, "Failed to initialize API client"),
    }
}
