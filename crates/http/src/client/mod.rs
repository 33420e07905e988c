//! Insight API client

pub mod error;

use error::ClientError;
use insight_core::ClientConfig;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

/// Supplies the bearer token at the moment a request is built
pub trait TokenSource {
    fn bearer_token(&self) -> Option<String>;
}

/// Notified whenever the server answers 401.
///
/// The client only reports the failure; what it means for the session is up
/// to the handler.
pub trait UnauthorizedHandler {
    fn on_unauthorized(&self, error: &ClientError);
}

impl<F: Fn(&ClientError)> UnauthorizedHandler for F {
    fn on_unauthorized(&self, error: &ClientError) {
        self(error);
    }
}

/// Insight API client
///
/// Clones share the token source and the registered handlers.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    token_source: Option<Rc<dyn TokenSource>>,
    unauthorized_handlers: Rc<RefCell<Vec<Rc<dyn UnauthorizedHandler>>>>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from the shared client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::builder()
            .base_url(config.api_url())
            .timeout(config.timeout())
            .build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout applied to every request
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the token source consulted on every request
    pub fn set_token_source(&mut self, source: Rc<dyn TokenSource>) {
        self.token_source = Some(source);
    }

    /// Register a handler for 401 responses
    pub fn on_unauthorized(&self, handler: Rc<dyn UnauthorizedHandler>) {
        self.unauthorized_handlers.borrow_mut().push(handler);
    }

    /// Create a request builder, attaching the bearer token when one exists
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url).timeout(self.timeout);

        if let Some(token) = self
            .token_source
            .as_ref()
            .and_then(|source| source.bearer_token())
            .filter(|token| !token.is_empty())
        {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a request and decode a JSON body.
    ///
    /// Non-success statuses become a [`ClientError`]. A 401 is reported to
    /// every registered handler before the error is returned.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = ClientError::from_response_body(status, &body);
            if error.is_unauthorized() {
                self.notify_unauthorized(&error);
            }
            Err(error)
        }
    }

    /// GET `path` and decode the response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// POST `body` as JSON to `path` and decode the response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    fn notify_unauthorized(&self, error: &ClientError) {
        // Handlers may register further handlers, so call them unborrowed
        let handlers = self.unauthorized_handlers.borrow().clone();
        warn!(handlers = handlers.len(), "Request rejected as unauthorized");
        for handler in handlers {
            handler.on_unauthorized(error);
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    token_source: Option<Rc<dyn TokenSource>>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the token source
    pub fn token_source(mut self, source: Rc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        // Applied per request: the browser client has no client-wide timeout
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(ClientConfig::DEFAULT_TIMEOUT_SECS));

        let mut client_builder = ClientBuilder::new();

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("insight-client/", env!("CARGO_PKG_VERSION")).to_string());
        client_builder = client_builder.user_agent(user_agent);

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            timeout,
            token_source: self.token_source,
            unauthorized_handlers: Rc::default(),
        })
    }
}
