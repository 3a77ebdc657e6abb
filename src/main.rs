mod app;
mod config;
mod error;
mod ui;

use app::App;
use config::Config;
use error::AppError;

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("NOW_PLAYING_LOG").unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}

/// Best effort: without a usable log file the app runs with no subscriber.
fn setup_logging(path: Option<PathBuf>) -> bool {
    match path {
        Some(path) => init_logging(&path).is_ok(),
        None => false,
    }
}

/// A config that fails to load is reported on the error screen, not fatal.
fn start_app(config: Result<Config, AppError>, picker: Option<Picker>) -> App {
    match config {
        Ok(config) => {
            tracing::info!(api_base = %config.api_base, "starting");
            let mut app = App::new(config, picker);
            app.fetch_movies();
            app
        }
        Err(e) => {
            tracing::error!(error = %e, "config failed to load");
            let fallback = Config::from_sources(None, |name| std::env::var(name).ok())
                .unwrap_or_default();
            App::failed_startup(fallback, picker, e)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging(config::log_file_path());
    let config = Config::load();

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let picker = match Picker::from_query_stdio() {
        Ok(picker) => Some(picker),
        Err(e) => {
            tracing::warn!(error = ?e, "terminal graphics query failed, using half blocks");
            Some(Picker::halfblocks())
        }
    };

    // create app and run it
    let mut app = start_app(config, picker);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        app.poll_messages();
        app.tick(Instant::now());

        // Poll for events with a timeout to allow UI updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Esc | KeyCode::Char('b') => app.dismiss_overlay(),
                    _ if app.overlay_active() => {}
                    KeyCode::Char('r') => app.retry(),
                    KeyCode::Char(' ') => app.advance_carousel(Instant::now()),
                    KeyCode::Right | KeyCode::Char('l') => app.next_item(),
                    KeyCode::Left | KeyCode::Char('h') => app.previous_item(),
                    KeyCode::Enter => app.open_focused(),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.handle_click(mouse.column, mouse.row, Instant::now());
                }
            }
            _ => {}
        }
    }
}
