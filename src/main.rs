mod api;
mod app;
mod cli;
mod config;
mod event;
mod logging;
mod model;
mod providers;
mod sync;
mod ui;
mod util;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use api::ApiClient;
use app::{Action, App};
use cli::Command;
use providers::backend::BackendSource;
use sync::TicketSync;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = cli::parse_args(&args)?;

    if parsed.command == Command::Help {
        cli::print_help();
        return Ok(());
    }

    // Resolve the backend once and hand it to the client explicitly
    let config = config::load_config()?;
    let env_url = std::env::var(config::BASE_URL_ENV).ok();
    let configured = config.base_url(parsed.base_url.as_deref(), env_url.as_deref());
    let source = BackendSource::new(ApiClient::new(configured.as_deref()));
    let base_url = source.base_url().to_string();
    let sync = Arc::new(TicketSync::new(Box::new(source)));

    match parsed.command {
        Command::List { all } => {
            logging::init_stderr_logging();
            cli::handle_list(&sync, &base_url, all).await
        }
        _ => {
            logging::init_file_logging()?;
            run_dashboard(sync, base_url).await
        }
    }
}

async fn run_dashboard(sync: Arc<TicketSync>, base_url: String) -> Result<()> {
    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(Arc::clone(&sync), base_url);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader and snapshot forwarder
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });
    tokio::spawn(event::forward_snapshots(sync.subscribe(), action_tx));

    // Initial fetch
    app.refresh();

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action);
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
