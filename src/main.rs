//! FinFest forms - terminal front end for the festival's login, signup and
//! contact forms
//!
//! Validation and the submission lifecycle live in `forms` and `submission`;
//! everything under `ui` only reads that state.

mod app;
mod config;
mod forms;
mod shortcuts;
mod state;
mod storage;
mod submission;
mod ui;

use anyhow::Result;
use app::App;
use config::FestConfig;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use storage::{FlagStore, JsonFileFlagStore, MemoryFlagStore};
use submission::{SimulatedSubmitter, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fest_forms=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FestConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {e:#}");
        FestConfig::default()
    });

    let flags: Box<dyn FlagStore> = match JsonFileFlagStore::default_path() {
        Some(path) => Box::new(JsonFileFlagStore::open(path)),
        None => {
            tracing::warn!("No data directory available; banner preference will not persist");
            Box::new(MemoryFlagStore::default())
        }
    };

    let mut app = App::new(
        &config,
        flags,
        Arc::new(SimulatedSubmitter::new(config.simulated_latency())),
        Arc::new(SystemClock),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished submissions and expire timers before drawing
        app.poll();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while a submission is in flight so the result shows promptly
        let poll_duration = if app.state.current().is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }

        // Let spawned submissions make progress between frames
        tokio::task::yield_now().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
