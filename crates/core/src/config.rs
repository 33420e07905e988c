//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keys under which the session is mirrored into persistent storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    /// Raw bearer token
    pub token: String,
    /// JSON-encoded user record
    pub user: String,
}

impl StorageKeys {
    pub const TOKEN: &'static str = "token";
    pub const USER: &'static str = "user";
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: Self::TOKEN.to_string(),
            user: Self::USER.to_string(),
        }
    }
}

/// Settings for the API client and the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host the API is served from. Empty means same-origin.
    pub origin: String,

    /// Path prefix of every API route
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Product name appended to document titles
    pub app_name: String,

    /// Storage key for the bearer token
    pub token_key: String,

    /// Storage key for the user record
    pub user_key: String,
}

impl ClientConfig {
    pub const DEFAULT_API_BASE: &'static str = "/api";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
    pub const DEFAULT_APP_NAME: &'static str = "Insight";

    /// Fully qualified API base, without a trailing slash
    pub fn api_url(&self) -> String {
        let origin = self.origin.trim_end_matches('/');
        let base = self.api_base.trim_end_matches('/');
        if base.is_empty() || base.starts_with('/') {
            format!("{origin}{base}")
        } else {
            format!("{origin}/{base}")
        }
    }

    /// Request timeout
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Storage keys for the session mirror
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            token: self.token_key.clone(),
            user: self.user_key.clone(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            app_name: Self::DEFAULT_APP_NAME.to_string(),
            token_key: StorageKeys::TOKEN.to_string(),
            user_key: StorageKeys::USER.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientConfig {
    /// Load configuration from a file, with `INSIGHT_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("INSIGHT"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from defaults and `INSIGHT_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> crate::Result<Self> {
        let settings = Self::builder()?
            .add_source(config::Environment::with_prefix("INSIGHT"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn builder() -> crate::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();

        Ok(config::Config::builder()
            .set_default("origin", defaults.origin)?
            .set_default("api_base", defaults.api_base)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("app_name", defaults.app_name)?
            .set_default("token_key", defaults.token_key)?
            .set_default("user_key", defaults.user_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url(), "/api");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.storage_keys(), StorageKeys::default());
    }

    #[test]
    fn test_api_url_joins_origin() {
        let config = ClientConfig {
            origin: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_url(), "http://localhost:5000/api");

        let config = ClientConfig {
            origin: "http://localhost:5000".to_string(),
            api_base: "v2/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_url(), "http://localhost:5000/v2");
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "origin = \"https://insight.example\"").unwrap();
        writeln!(file, "timeout_secs = 30").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.origin, "https://insight.example");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.token_key, "token");
    }
}
