//! Error types for the Trawler client.
//!
//! The taxonomy separates failures the caller can act on: missing
//! credentials at construction time, network-level transport failures,
//! non-2xx responses from completed requests, and undecodable bodies.

use thiserror::Error;

/// The main error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was available when the client was constructed.
    ///
    /// Raised synchronously, before any network call is attempted.
    #[error("no API key provided: pass one explicitly or set {env_var}")]
    Configuration {
        /// The environment variable that was consulted.
        env_var: &'static str,
    },

    /// A network-level failure (DNS, connection reset, timeout) that
    /// persisted through the retry budget.
    #[error("transport error while trying to {action}: {source}")]
    Transport {
        /// Description of the attempted operation.
        action: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// A completed request returned a status outside 2xx after retries
    /// were exhausted.
    #[error("failed to {action}: status code {status}")]
    Status {
        /// Description of the attempted operation.
        action: String,
        /// The HTTP status code returned by the server.
        status: u16,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response while trying to {action}: {source}")]
    Decode {
        /// Description of the attempted operation.
        action: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Creates a transport error with operation context.
    #[must_use]
    pub fn transport(action: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            action: action.into(),
            source,
        }
    }

    /// Creates a status error with operation context.
    #[must_use]
    pub fn status(action: impl Into<String>, status: u16) -> Self {
        Self::Status {
            action: action.into(),
            status,
        }
    }

    /// Creates a decode error with operation context.
    #[must_use]
    pub fn decode(action: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            action: action.into(),
            source,
        }
    }

    /// Whether the server rejected the request as unauthorized (401/403).
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Whether the server reported the resource as missing (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Whether the failure was on the server side (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (500..600).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_carries_action_and_code() {
        let err = Error::status("post to v1/crawl", 402);
        assert_eq!(err.to_string(), "failed to post to v1/crawl: status code 402");
    }

    #[test]
    fn test_auth_error_classification() {
        assert!(Error::status("x", 401).is_auth_error());
        assert!(Error::status("x", 403).is_auth_error());
        assert!(!Error::status("x", 404).is_auth_error());
        assert!(Error::status("x", 404).is_not_found());
    }

    #[test]
    fn test_server_error_classification() {
        assert!(Error::status("x", 500).is_server_error());
        assert!(Error::status("x", 503).is_server_error());
        assert!(!Error::status("x", 499).is_server_error());
        assert!(!Error::status("x", 600).is_server_error());
    }

    #[test]
    fn test_configuration_error_names_env_var() {
        let err = Error::Configuration {
            env_var: crate::config::API_KEY_ENV,
        };
        assert!(err.to_string().contains("TRAWLER_API_KEY"));
    }
}
