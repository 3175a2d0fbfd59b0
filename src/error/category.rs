//! Error category classification.
//!
//! Categories drive how a failure is logged and what the user is told to do
//! about it.

use std::fmt;

/// High-level categorization of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, or a transport read that broke mid-stream.
    Network,

    /// The completion endpoint answered with an error status or closed the
    /// stream without finishing.
    Server,

    /// The user stopped the operation.
    User,

    /// Missing or invalid configuration.
    /// Nothing works until the configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Short label for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested next step for the user.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your network connection and send the message again.",
            ErrorCategory::Server => "The endpoint may be overloaded; try again in a moment.",
            ErrorCategory::User => "Send the message again when you are ready.",
            ErrorCategory::Configuration => {
                "Set CHATDECK_API_KEY or add an apiKey entry to the config file."
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
