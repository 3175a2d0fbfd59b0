//! CLI module for chatdeck.
//!
//! Handles the flags that print and exit before the TUI starts.
//!
//! ```ignore
//! use chatdeck::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     // CLI command was executed, exit with result
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{handle_help_command, handle_version_command, usage, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Run a CLI command if applicable.
///
/// Returns `None` for `RunTui`. `Version` and `Help` exit the process.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::MissingConfigPath => Some(Err(eyre!("--config requires a path"))),
        CliCommand::RunTui { .. } => None,
    }
}
