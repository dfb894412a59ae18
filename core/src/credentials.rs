//! Basic-auth credentials.
//!
//! The password lives in a `Zeroizing` buffer and never appears in `Debug`
//! output. The `Authorization` value is rebuilt for every request and
//! dropped (and wiped) with that request.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::error::ConfigError;

#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Both parts must be non-empty. Whitespace is kept as given.
    pub fn new(username: &str, password: &str) -> Result<Self, ConfigError> {
        if username.is_empty() || password.is_empty() {
            return Err(ConfigError::EmptyCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Basic {base64(username:password)}`.
    pub fn authorization(&self) -> Zeroizing<String> {
        let pair = Zeroizing::new(format!("{}:{}", self.username, self.password.as_str()));
        Zeroizing::new(format!("Basic {}", STANDARD.encode(pair.as_bytes())))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
