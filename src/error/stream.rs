//! Streaming-related error types.
//!
//! Errors that end a response stream after the connection was established.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The byte stream ended before the `[DONE]` sentinel arrived.
    ClosedUnexpectedly,

    /// The transport failed while the body was being read.
    Interrupted { message: String },

    /// The user stopped generation.
    Cancelled,
}

impl StreamError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ClosedUnexpectedly => "E_STREAM_CLOSED",
            StreamError::Interrupted { .. } => "E_STREAM_CONN",
            StreamError::Cancelled => "E_STREAM_CANCEL",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ClosedUnexpectedly => write!(f, "stream closed unexpectedly"),
            StreamError::Interrupted { message } => write!(f, "stream interrupted: {}", message),
            StreamError::Cancelled => write!(f, "cancelled by user"),
        }
    }
}

impl std::error::Error for StreamError {}
