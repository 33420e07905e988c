//! Authentication module

pub mod context;
pub mod forms;

pub use context::{AuthAction, AuthContext, AuthProvider, SessionHandle, use_auth};
pub use forms::{LoginForm, RegisterForm};
