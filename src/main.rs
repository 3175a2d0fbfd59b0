use chatdeck::app::App;
use chatdeck::cli::{parse_args, run_cli_command, CliCommand};
use chatdeck::completion::CompletionClient;
use chatdeck::error::ChatError;
use chatdeck::startup::{default_log_path, init_logging, ChatConfig};
use chatdeck::terminal::{setup_panic_hook, TerminalManager};
use chatdeck::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::time::Duration;

/// Redraw/animation cadence
const TICK: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result;
    }
    let CliCommand::RunTui { config_path } = command else {
        return Ok(());
    };

    let config = match ChatConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let err = ChatError::from(e);
            eprintln!("{}", err);
            eprintln!("{}", err.recovery_hint());
            std::process::exit(2);
        }
    };

    let log_path = default_log_path();
    if let Err(e) = init_logging(&config.log_filter, &log_path) {
        eprintln!("Warning: logging disabled ({}): {}", log_path.display(), e);
    }
    tracing::info!("Starting with {:?}", config);

    setup_panic_hook();

    let mut app = App::new(CompletionClient::new(config));
    let mut term_manager = TerminalManager::new()?;
    let result = run_app(term_manager.terminal(), &mut app).await;
    term_manager.restore()?;

    if let Err(ref e) = result {
        tracing::error!("UI loop failed: {:?}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key_event(key),
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
