//! cinelist - terminal movie search and watchlist
//!
//! ```bash
//! cinelist
//! cinelist --region us -v
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use cinelist::cli::Cli;
use cinelist::logging;
use cinelist::session::{Action, Services};
use cinelist::{App, Config, SearchClient, Session, StreamingClient, WatchlistStore};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(logging::default_log_file);
    let _guard = logging::init_logging(cli.verbose, &log_file)
        .with_context(|| format!("Failed to set up logging at {}", log_file.display()))?;

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let services = Services {
        search: SearchClient::new(config.search_api_key()),
        streaming: StreamingClient::new(config.streaming_api_key(), config.region.clone()),
        store: WatchlistStore::new(config.watchlist_path()),
    };
    info!(
        region = services.streaming.region(),
        watchlist = %services.store.path().display(),
        "Starting cinelist"
    );
    if !services.search.is_configured() {
        warn!("Title search API key not configured");
    }

    run_tui(services).await
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(services: Services) -> Result<()> {
    let session = Session::open(&services.store);
    let mut app = App::new(session);

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &services).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - renders, runs pending actions, then reads input
async fn run_event_loop(terminal: &mut Tui, app: &mut App, services: &Services) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| cinelist::ui::render(frame, app))?;

        if let Some(action) = app.pending_action() {
            run_action(terminal, app, action, services).await?;
            continue;
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        run_action(terminal, app, action, services).await?;
                    }
                }
            }
        }
    }

    info!("Exiting cinelist");
    Ok(())
}

/// Run one action to completion, showing the busy overlay while it does I/O
async fn run_action(
    terminal: &mut Tui,
    app: &mut App,
    action: Action,
    services: &Services,
) -> Result<()> {
    if let Some(label) = App::busy_label(&action) {
        app.busy = Some(label);
        terminal.draw(|frame| cinelist::ui::render(frame, app))?;
    }
    app.apply(action, services).await;
    app.busy = None;
    Ok(())
}
