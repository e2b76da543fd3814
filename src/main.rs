//! Workout Logger
//!
//! A terminal client for logging workouts to a remote workout API.
//! The form holds a draft workout with its exercises; saving posts it to
//! the backend and the recent workouts pane shows what is stored for the
//! current user.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use workout_logger::application::{App, AppMode};
use workout_logger::infrastructure::{Config, HttpGateway, RequestDispatcher};
use workout_logger::presentation::{render_ui, InputHandler};

/// How long the event loop waits for a key before checking for finished
/// requests.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point for the workout logger.
///
/// Resolves configuration, starts logging, sets up the terminal and runs
/// the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the log file, the HTTP client or the terminal
/// cannot be set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_logging(&config.log_path)?;
    info!(backend = %config.backend_url, "starting workout logger");

    let gateway = HttpGateway::new(&config.backend_url)?;
    let dispatcher = RequestDispatcher::new(Arc::new(gateway));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    dispatcher.dispatch(app.refresh_list());
    let res = run_app(&mut terminal, &mut app, &dispatcher);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal failure");
        println!("{err:?}");
    }
    info!("workout logger stopped");

    Ok(())
}

/// Sends log output to `path`; the terminal itself belongs to the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("workout_logger=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Applies finished gateway requests, redraws, and handles at most one key
/// press per iteration. Continues until the user presses 'q' in normal
/// mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &RequestDispatcher,
) -> io::Result<()> {
    loop {
        for completion in dispatcher.completions() {
            if let Some(follow_up) = app.apply(completion) {
                dispatcher.dispatch(follow_up);
            }
        }

        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => {
                        if let Some(request) =
                            InputHandler::handle_key_event(app, key.code, key.modifiers)
                        {
                            dispatcher.dispatch(request);
                        }
                    }
                }
            }
        }
    }
}
