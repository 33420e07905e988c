//! Frontend configuration

use insight_core::ClientConfig;
use web_sys::window;

/// Client configuration for the page we are served from.
///
/// reqwest needs absolute URLs in the browser, so the API base is anchored
/// to the window origin.
pub fn client_config() -> ClientConfig {
    let origin = window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();

    ClientConfig {
        origin,
        ..ClientConfig::default()
    }
}
