//! Network-related error types.
//!
//! Errors raised while opening the connection to the completion endpoint,
//! before any part of the response body has been read.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the endpoint failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { message: String },

    /// Endpoint answered with a non-2xx status.
    HttpStatus { status: u16, message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Classify a transport error for the request sent to `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout { message },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            other => NetworkError::Other {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "connection to '{}' failed: {}", url, message)
            }
            NetworkError::Timeout { message } => write!(f, "request timed out: {}", message),
            NetworkError::HttpStatus { status, message } => {
                if message.is_empty() {
                    write!(f, "API request failed with status {}", status)
                } else {
                    write!(f, "API request failed with status {}: {}", status, message)
                }
            }
            NetworkError::Other { message } => write!(f, "network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
