//! Terminal event handler module
//!
//! This module routes terminal events (keys, mouse, resize, focus) to the
//! editor application.

use std::time::Instant;

use tracing::trace;

use crate::core::app::EditorApp;
use crate::terminal::events::EditorEvent;
use crate::terminal::render::text_area;

/// Processes a single editor event. Returns true if exit is requested.
pub fn process_terminal_event(app: &mut EditorApp, event: EditorEvent, now: Instant) -> bool {
    match event {
        EditorEvent::Input(key) => {
            trace!(key = %key.key, "key press");
            app.handle_input(&key, now)
        }
        EditorEvent::Mouse(mouse) => {
            app.handle_mouse(&mouse, now);
            false
        }
        EditorEvent::Resize(cols, rows) => {
            app.set_text_area(text_area(cols, rows), now);
            false
        }
        EditorEvent::FocusLost => {
            app.on_focus_lost(now);
            false
        }
        EditorEvent::None => false,
    }
}
