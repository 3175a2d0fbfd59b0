//! Startup: configuration loading and logging setup.
//!
//! # Components
//!
//! - [`config`] - [`ChatConfig`] layering (defaults, config file, environment)
//! - [`logging`] - file-backed tracing subscriber
//!
//! # Usage
//!
//! ```ignore
//! use chatdeck::startup::{init_logging, default_log_path, ChatConfig};
//!
//! let config = ChatConfig::load(None)?;
//! init_logging(&config.log_filter, &default_log_path())?;
//! ```

pub mod config;
pub mod logging;

pub use config::{default_config_path, ChatConfig, ConfigFile};
pub use logging::{default_log_path, init_logging};
