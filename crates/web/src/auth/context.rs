//! Authentication context and provider

use crate::redirect::HistoryRedirector;
use crate::storage::LocalStorage;
use insight_core::{ClientConfig, SessionStore, User};
use insight_http::{ApiClient, ClientError, SessionService};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type WebSessionService = SessionService<LocalStorage>;

/// Session service and redirector created once at startup
#[derive(Clone)]
pub struct SessionHandle {
    pub service: Rc<WebSessionService>,
    pub redirector: Rc<HistoryRedirector>,
}

impl SessionHandle {
    /// Rehydrate the session from `localStorage` and wire up the client
    pub fn init(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = ApiClient::from_config(config)?;
        let session = SessionStore::load_with_keys(LocalStorage::new(), config.storage_keys());
        let redirector = Rc::new(HistoryRedirector::default());
        let service = SessionService::new(
            Rc::new(RefCell::new(session)),
            client,
            redirector.clone(),
        );

        Ok(Self {
            service: Rc::new(service),
            redirector,
        })
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.service, &other.service)
    }
}

/// Snapshot of the session for rendering
#[derive(Clone)]
pub struct AuthContextData {
    pub handle: SessionHandle,
    pub logged_in: bool,
    pub user: Option<User>,
}

impl AuthContextData {
    fn snapshot(handle: SessionHandle) -> Self {
        let logged_in = handle.service.is_logged_in();
        let user = handle.service.user();
        Self {
            handle,
            logged_in,
            user,
        }
    }

    pub fn service(&self) -> &WebSessionService {
        &self.handle.service
    }
}

impl PartialEq for AuthContextData {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.logged_in == other.logged_in && self.user == other.user
    }
}

pub enum AuthAction {
    Login { token: String, user: User },
    Logout,
    /// Re-read the session after it changed outside the reducer
    Sync,
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthContextData>;

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Login { token, user } => self.service().set_auth(token, Some(user)),
            AuthAction::Logout => self.service().logout(),
            AuthAction::Sync => {}
        }
        Rc::new(Self::snapshot(self.handle.clone()))
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub session: SessionHandle,
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth = {
        let handle = props.session.clone();
        use_reducer(move || AuthContextData::snapshot(handle))
    };

    // Forced logouts (401) re-render the tree
    {
        let auth = auth.clone();
        use_effect_with((), move |_| {
            let redirector = auth.handle.redirector.clone();
            let dispatcher = auth.dispatcher();
            redirector.set_listener(Callback::from(move |_| dispatcher.dispatch(AuthAction::Sync)));

            move || redirector.clear_listener()
        });
    }

    // Refresh the stored user record once per page load
    {
        let auth = auth.clone();
        use_effect_with((), move |_| {
            if auth.logged_in {
                let service = auth.handle.service.clone();
                let dispatcher = auth.dispatcher();
                wasm_bindgen_futures::spawn_local(async move {
                    service.fetch_me().await;
                    dispatcher.dispatch(AuthAction::Sync);
                });
            }
        });
    }

    html! {
        <ContextProvider<AuthContext> context={auth}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}
