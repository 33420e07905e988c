//! Session service: binds the session store to the API client

use crate::auth::{LoginRequest, RegisterRequest};
use crate::client::{ApiClient, TokenSource, UnauthorizedHandler, error::ClientError};
use insight_core::{KeyValueStore, RouteName, SessionStore, User};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Session shared between the service, the client and the UI.
///
/// Execution is single-threaded, so a `RefCell` is enough.
pub type SharedSession<S> = Rc<RefCell<SessionStore<S>>>;

/// Forces navigation, e.g. to the login page after a 401
pub trait Redirector {
    fn redirect(&self, route: RouteName);
}

impl<S: KeyValueStore> TokenSource for RefCell<SessionStore<S>> {
    fn bearer_token(&self) -> Option<String> {
        match self.try_borrow() {
            Ok(session) => session.token().map(str::to_string),
            Err(_) => {
                warn!("Session is being updated, sending request without a token");
                None
            }
        }
    }
}

/// Clears the session and sends the user to login when a request comes
/// back 401
struct SessionExpiry<S> {
    session: SharedSession<S>,
    redirector: Rc<dyn Redirector>,
}

impl<S: KeyValueStore> UnauthorizedHandler for SessionExpiry<S> {
    fn on_unauthorized(&self, error: &ClientError) {
        warn!(error = %error, "Credentials rejected, ending session");
        match self.session.try_borrow_mut() {
            Ok(mut session) => session.logout(),
            Err(_) => warn!("Session is borrowed elsewhere, could not clear it"),
        }
        self.redirector.redirect(RouteName::Login);
    }
}

/// Auth operations over an explicitly owned session
pub struct SessionService<S> {
    session: SharedSession<S>,
    client: ApiClient,
}

impl<S: KeyValueStore + 'static> SessionService<S> {
    /// Wire `client` to read its token from `session` and to end the
    /// session through `redirector` on 401.
    pub fn new(session: SharedSession<S>, mut client: ApiClient, redirector: Rc<dyn Redirector>) -> Self {
        client.set_token_source(session.clone());
        client.on_unauthorized(Rc::new(SessionExpiry {
            session: session.clone(),
            redirector,
        }));

        Self { session, client }
    }
}

impl<S: KeyValueStore> SessionService<S> {
    pub const fn session(&self) -> &SharedSession<S> {
        &self.session
    }

    /// Client carrying this session's token, for other API calls
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.borrow().is_logged_in()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user().cloned()
    }

    pub fn set_auth(&self, token: impl Into<String>, user: Option<User>) {
        self.session.borrow_mut().set_auth(token, user);
    }

    pub fn logout(&self) {
        self.session.borrow_mut().logout();
    }

    /// Refresh the user record from the server.
    ///
    /// Any failure ends the session instead of surfacing an error.
    pub async fn fetch_me(&self) {
        match self.client.me().await {
            Ok(user) => {
                debug!(user = user.username(), "Refreshed user record");
                self.session.borrow_mut().set_user(user);
            }
            Err(e) => {
                info!(error = %e, "Could not refresh user record, logging out");
                self.logout();
            }
        }
    }

    /// Log in and store the resulting session
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .client
            .login(&LoginRequest::new(username, password))
            .await?;
        self.set_auth(response.token, Some(response.user.clone()));
        Ok(response.user)
    }

    /// Register and store the resulting session
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ClientError> {
        let response = self
            .client
            .register(&RegisterRequest::new(username, email, password))
            .await?;
        self.set_auth(response.token, Some(response.user.clone()));
        Ok(response.user)
    }
}
