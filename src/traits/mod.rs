//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - streaming POST used by the completion client

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
