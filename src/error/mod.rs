//! Error handling for chatdeck.
//!
//! - **Error Categories**: high-level classification used for logging and hints
//! - **Domain errors**: network, stream, and configuration failures
//! - **Unified type**: `ChatError` wraps all of them
//!
//! | Category | Raised by |
//! |----------|-----------|
//! | Network | connect failures, timeouts, mid-stream transport failures |
//! | Server | non-2xx status, stream closed without `[DONE]` |
//! | User | "stop generating" |
//! | Configuration | missing API key, bad endpoint, bad config file |
//!
//! Malformed SSE lines are not errors at all; the parser logs and skips them.

mod category;
mod chat_error;
mod config;
mod network;
mod stream;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use config::ConfigError;
pub use network::NetworkError;
pub use stream::StreamError;

/// Result alias used across the library.
pub type ChatResult<T> = Result<T, ChatError>;
