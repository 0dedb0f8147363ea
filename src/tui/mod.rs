//! TUI module
//!
//! Terminal dashboard for kube-applier Waybill status, built with ratatui for
//! a K9s-inspired experience.

pub mod app;
pub mod keybindings;
mod theme;
pub mod views;

pub use app::App;
pub use theme::*;

use crate::config::Config;
use crate::dashboard::{Route, spawn_fetch};
use crate::source::StatusSource;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Event poll period for the main loop
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI application
pub async fn run_tui(
    source: Arc<dyn StatusSource>,
    route: Route,
    config: Config,
    refresh_interval: Option<Duration>,
    theme: Theme,
) -> Result<()> {
    tracing::debug!("Initializing TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let enable_mouse = config.ui.enable_mouse;
    let mut app = App::new(route, config, theme, source.describe(), refresh_interval);

    tracing::debug!("TUI initialized, entering main loop");
    let result = run_loop(&mut terminal, &mut app, source).await;

    // Restore terminal even when the loop failed
    app.unmount();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    tracing::debug!("TUI exited");
    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: Arc<dyn StatusSource>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        // Spawn the queued fetch, if any
        if let Some(ticket) = app.take_fetch_request() {
            let generation = ticket.generation;
            let handle = spawn_fetch(source.clone(), ticket);
            app.track_fetch(generation, handle.abort_handle());
        }

        app.poll_fetch();
        app.tick(Instant::now());

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(true) = app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Let fetch tasks make progress between frames
        tokio::task::yield_now().await;
    }
}
