//! chatdeck - a terminal chat client that streams model replies
//!
//! This library exposes modules for use in integration tests.

pub mod accumulator;
pub mod adapters;
pub mod app;
pub mod cache;
pub mod cli;
pub mod completion;
pub mod error;
pub mod markdown;
pub mod models;
pub mod sse;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
