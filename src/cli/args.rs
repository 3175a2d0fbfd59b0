//! Command-line argument parsing for chatdeck.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// `--config` was given without a path
    MissingConfigPath,
    /// Run the TUI application (default)
    RunTui {
        /// Explicit config file, overriding the default location
        config_path: Option<PathBuf>,
    },
}

/// Parse command-line arguments and return the appropriate command.
///
/// Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use chatdeck::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatdeck".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut config_path = None;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => return CliCommand::MissingConfigPath,
            },
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    config_path = Some(PathBuf::from(path));
                }
            }
        }
    }
    CliCommand::RunTui { config_path }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["chatdeck".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunTui { config_path: None });
    }

    #[test]
    fn test_parse_config_path() {
        assert_eq!(
            parse(&["--config", "/tmp/chat.json"]),
            CliCommand::RunTui {
                config_path: Some(PathBuf::from("/tmp/chat.json"))
            }
        );
        assert_eq!(
            parse(&["--config=/tmp/other.json"]),
            CliCommand::RunTui {
                config_path: Some(PathBuf::from("/tmp/other.json"))
            }
        );
    }

    #[test]
    fn test_parse_config_without_path() {
        assert_eq!(parse(&["--config"]), CliCommand::MissingConfigPath);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::RunTui { config_path: None }
        );
    }

    #[test]
    fn test_version_wins_over_config() {
        assert_eq!(parse(&["--config", "x.json", "-V"]), CliCommand::Version);
    }
}
