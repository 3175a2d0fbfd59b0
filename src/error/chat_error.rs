//! Unified error type for chatdeck.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::network::NetworkError;
use super::stream::StreamError;

/// Unified error type.
///
/// Network and stream failures are wrapped in one of these so they are logged
/// with a category and code; the `Display` text becomes the reason carried by
/// `StreamEvent::Error`. Config failures are reported by the binary.
#[derive(Debug)]
pub enum ChatError {
    /// Connection or HTTP status failures.
    Network(NetworkError),

    /// Failures after the response body started streaming.
    Stream(StreamError),

    /// Missing or invalid configuration.
    Config(ConfigError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Server,
            ChatError::Network(_) => ErrorCategory::Network,
            ChatError::Stream(StreamError::Cancelled) => ErrorCategory::User,
            ChatError::Stream(StreamError::ClosedUnexpectedly) => ErrorCategory::Server,
            ChatError::Stream(StreamError::Interrupted { .. }) => ErrorCategory::Network,
            ChatError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::Config(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Stream(err) => write!(f, "{}", err),
            ChatError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Stream(err) => Some(err),
            ChatError::Config(err) => Some(err),
        }
    }
}

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<StreamError> for ChatError {
    fn from(err: StreamError) -> Self {
        ChatError::Stream(err)
    }
}

impl From<ConfigError> for ChatError {
    fn from(err: ConfigError) -> Self {
        ChatError::Config(err)
    }
}
