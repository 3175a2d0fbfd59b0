//! Version and usage text for the chatdeck CLI.

/// The current version of chatdeck, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub fn usage() -> String {
    format!(
        "chatdeck {VERSION}
Terminal chat client with streaming model replies

USAGE:
    chatdeck [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Read configuration from PATH
    -h, --help             Print this help
    -V, --version          Print version

ENVIRONMENT:
    CHATDECK_API_KEY       API key for the completion endpoint
    CHATDECK_ENDPOINT      Completion endpoint URL
    CHATDECK_MODEL         Model identifier
    CHATDECK_TEMPERATURE   Sampling temperature (0.0 - 2.0)
    CHATDECK_LOG           Log filter, e.g. chatdeck=debug

KEYS:
    Enter send, Alt+Enter newline, Up/Down switch contact,
    Esc stop generating, Ctrl+C quit"
    )
}

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("chatdeck {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}", usage());
    std::process::exit(0)
}
