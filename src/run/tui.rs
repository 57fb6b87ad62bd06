//! Terminal (TUI) mode implementation.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::Config;
use crate::core::app::EditorApp;
use crate::terminal;
use crate::terminal::event_handler::process_terminal_event;

/// Idle poll interval
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run in terminal (TUI) mode.
pub fn run_terminal_mode(
    file: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = EditorApp::initialize_with_config(config, file);
    info!(file = ?file, "starting editor");

    let _raw_mode = terminal::raw::RawMode::new()?;
    let mut stdout = io::stdout();
    let mut event_handler = terminal::events::EventHandler::new();

    let (mut cols, mut rows) = crossterm::terminal::size()?;
    app.set_text_area(terminal::render::text_area(cols, rows), Instant::now());
    terminal::render::render(&mut stdout, &app, cols, rows)?;

    loop {
        let mut dirty = false;

        // Wake for the next cooldown deadline, but never sleep past the
        // idle interval.
        let timeout = app
            .tasks
            .next_deadline()
            .map(|d| d.saturating_duration_since(Instant::now()))
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));

        if event_handler.poll(timeout)? {
            let event = event_handler.read()?;
            if let terminal::events::EditorEvent::Resize(c, r) = event {
                (cols, rows) = (c, r);
            }
            if process_terminal_event(&mut app, event, Instant::now()) {
                break;
            }
            dirty = true;
        }

        dirty |= app.tick(Instant::now());

        if dirty {
            terminal::render::render(&mut stdout, &app, cols, rows)?;
        }
    }

    info!("editor exiting");
    Ok(())
}
