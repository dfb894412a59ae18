//! Error types for the WordPress client.
//!
//! # Design
//! Callers see two kinds of per-call failure, joined in `ApiError`:
//! `TransportError` when the round-trip itself broke (connection, I/O, a
//! body that is not JSON), and `WordpressError` when WordPress answered but
//! the answer did not have the expected shape. `WordpressError` carries a
//! fixed message per operation; the serde diagnostic is logged, not returned.
//!
//! `ConfigError` is raised once, while building a client, and never from a
//! `load_*` call.

/// Failure at the HTTP layer, passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not valid JSON.
    #[error("invalid response JSON: {0}")]
    Decode(String),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

/// WordPress answered, but not with what the operation expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WordpressError {
    pub message: String,
}

impl WordpressError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by `WordpressClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Wordpress(#[from] WordpressError),
}

impl ApiError {
    /// The `WordpressError` inside, if this is a domain failure.
    pub fn as_wordpress(&self) -> Option<&WordpressError> {
        match self {
            ApiError::Wordpress(err) => Some(err),
            ApiError::Transport(_) => None,
        }
    }
}

/// Invalid or missing client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid WordPress API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid content status {0:?}, expected \"draft\" or \"publish\"")]
    InvalidStatus(String),

    #[error("WORDPRESS_USERNAME or WORDPRESS_PASSWORD is not set")]
    EmptyCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wordpress_error_displays_bare_message() {
        let err = ApiError::from(WordpressError::new("Failed to fetch tags"));
        assert_eq!(err.to_string(), "Failed to fetch tags");
        assert_eq!(
            err.as_wordpress().map(|e| e.message.as_str()),
            Some("Failed to fetch tags")
        );
    }

    #[test]
    fn transport_error_is_not_a_wordpress_error() {
        let err = ApiError::from(TransportError::Request("connection refused".to_string()));
        assert!(err.as_wordpress().is_none());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn empty_credentials_message_names_both_variables() {
        assert_eq!(
            ConfigError::EmptyCredentials.to_string(),
            "WORDPRESS_USERNAME or WORDPRESS_PASSWORD is not set"
        );
    }
}
