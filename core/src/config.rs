//! Site configuration: API root, credentials and default content status.
//!
//! # Design
//! Everything is validated once, at construction. `from_env` reads the
//! `WORDPRESS_*` variables; `from_lookup` takes any key lookup so tests
//! never touch the process environment.

use url::Url;

use crate::credentials::Credentials;
use crate::error::ConfigError;
use crate::types::ContentStatus;

pub const API_URL_VAR: &str = "WORDPRESS_API_URL";
pub const USERNAME_VAR: &str = "WORDPRESS_USERNAME";
pub const PASSWORD_VAR: &str = "WORDPRESS_PASSWORD";
pub const STATUS_VAR: &str = "WORDPRESS_STATUS";

/// Everything a `WordpressClient` needs besides its transport.
#[derive(Debug, Clone)]
pub struct WordpressConfig {
    api_url: Url,
    credentials: Credentials,
    status: ContentStatus,
}

impl WordpressConfig {
    pub fn new(
        api_url: &str,
        username: &str,
        password: &str,
        status: ContentStatus,
    ) -> Result<Self, ConfigError> {
        let api_url = Url::parse(api_url).map_err(|e| ConfigError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            api_url,
            credentials: Credentials::new(username, password)?,
            status,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `WORDPRESS_API_URL`: site root, e.g. `https://blog.example.com`
    /// - `WORDPRESS_USERNAME`: user owning the application password
    /// - `WORDPRESS_PASSWORD`: application password
    /// - `WORDPRESS_STATUS`: default content status, `draft` or `publish`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let api_url = require(API_URL_VAR)?;
        let username = require(USERNAME_VAR)?;
        let password = zeroize::Zeroizing::new(require(PASSWORD_VAR)?);
        let status: ContentStatus = require(STATUS_VAR)?.parse()?;

        Self::new(&api_url, &username, &password, status)
    }

    /// Site root without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Status used when an operation is called without one.
    pub fn status(&self) -> ContentStatus {
        self.status
    }
}
