//! Auth endpoints

use crate::client::{ApiClient, error::ClientError};
use insight_core::User;
use serde::{Deserialize, Serialize};

/// Shortest password the backend accepts at registration
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: &str, password: impl Into<String>) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if a field is empty
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation(
                "username and password are required".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: impl Into<String>) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if a field is empty or the
    /// password is too short
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation(
                "username, email and password are required".into(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Body of a successful login or registration
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body of `/auth/me`; the user record is taken as sent
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub user: User,
}

impl ApiClient {
    /// Fetch the user the current token belongs to.
    ///
    /// Any JSON object is accepted; a missing or `null` `user` yields a
    /// null record, which the session store treats as no user.
    pub async fn me(&self) -> Result<User, ClientError> {
        let response: MeResponse = self.get("/auth/me").await?;
        Ok(response.user)
    }

    /// Exchange credentials for a token
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        request.validate()?;
        self.post("/auth/login", request).await
    }

    /// Create an account; the backend logs the new user in directly
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        request.validate()?;
        self.post("/auth/register", request).await
    }
}
