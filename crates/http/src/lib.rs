//! Insight HTTP layer
//!
//! [`client::ApiClient`] is the transport: it attaches the bearer token and
//! reports 401 responses to whoever registered for them. [`session::SessionService`]
//! is the policy: it owns the session, registers itself with the client and
//! turns auth failures into a logout plus a redirect to the login route.

pub mod auth;
pub mod client;
pub mod session;

pub use client::error::ClientError;
pub use client::{ApiClient, ApiClientBuilder, TokenSource, UnauthorizedHandler};
pub use session::{Redirector, SessionService, SharedSession};
