mod app;
mod ui;

use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::Result;
use autoq::config::{self, AppConfig};
use autoq::logging;
use autoq::store::{JsonFilePersistence, WorkTabStore};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config, writing the defaults out on first run
    let cfg = config::load_config()?;
    let first_run = !config::config_path().exists();

    let log_path = logging::init_logging(&cfg.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "autoq starting");

    if first_run {
        if let Err(e) = config::save_config(&cfg) {
            tracing::warn!(error = %e, "could not write default config");
        }
    }

    let store = open_store(&cfg);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, store).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "autoq exited with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("autoq stopped");
    Ok(())
}

fn open_store(cfg: &AppConfig) -> WorkTabStore {
    let store = WorkTabStore::new().with_default_state(cfg.store.default_state.clone());
    if !cfg.store.persist {
        tracing::info!("work tab persistence disabled");
        return store;
    }
    let persistence = JsonFilePersistence::new(cfg.store.state_file_path());
    tracing::info!(path = %persistence.path().display(), "work tab state file");
    store.with_persistence(persistence)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: AppConfig,
    store: WorkTabStore,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg, store);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (4 per second is plenty for status expiry)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    if state.store.is_empty() {
        state.info(format!("Welcome to {}!", state.config.ui.title));
        state.info("Open a work tab:  /new <id>");
        state.info("All commands:     /help");
    } else {
        let ids = state.store.work_tab_ids().join(", ");
        state.info(format!("Restored {} work tab(s): {}", state.store.len(), ids));
    }

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        handler::handle_event(&mut state, event);

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
