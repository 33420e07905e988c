//! Navigation forced from outside the component tree

use insight_core::RouteName;
use insight_http::Redirector;
use std::cell::RefCell;
use tracing::debug;
use yew::Callback;
use yew_router::history::{BrowserHistory, History};

/// Pushes onto the browser history, then tells the UI the session changed.
///
/// The listener is attached once the auth provider has mounted.
#[derive(Default)]
pub struct HistoryRedirector {
    listener: RefCell<Option<Callback<RouteName>>>,
}

impl HistoryRedirector {
    pub fn set_listener(&self, listener: Callback<RouteName>) {
        *self.listener.borrow_mut() = Some(listener);
    }

    pub fn clear_listener(&self) {
        *self.listener.borrow_mut() = None;
    }
}

impl Redirector for HistoryRedirector {
    fn redirect(&self, route: RouteName) {
        debug!(to = route.path(), "Forced navigation");
        BrowserHistory::new().push(route.path());

        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener.emit(route);
        }
    }
}
