use crate::core::input::{InputEvent, Key, MouseButton, MouseEvent, MouseEventKind};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Editor events
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Input(InputEvent),
    Resize(u16, u16),
    Mouse(MouseEvent),
    FocusLost,
    None,
}

pub struct EventHandler {
    // Click tracking for double/triple clicks
    last_click_time: Option<Instant>,
    last_click_pos: (u16, u16),
    last_click_button: Option<MouseButton>,
    current_click_count: u8,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Create a new EventHandler
    pub fn new() -> Self {
        Self {
            last_click_time: None,
            last_click_pos: (0, 0),
            last_click_button: None,
            current_click_count: 0,
        }
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> std::io::Result<bool> {
        event::poll(timeout)
    }

    /// Read the next event, or `EditorEvent::None` when nothing is queued
    pub fn read(&mut self) -> std::io::Result<EditorEvent> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(EditorEvent::None);
        }
        Ok(self.convert(event::read()?))
    }

    fn convert(&mut self, event: Event) -> EditorEvent {
        match event {
            // Release events only arrive on some platforms; the editor
            // synthesizes its own release after each press.
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                EditorEvent::Input(self.crossterm_key_to_input(key_event))
            }
            Event::Resize(cols, rows) => EditorEvent::Resize(cols, rows),
            Event::Mouse(mouse_event) => match self.process_mouse_event(mouse_event) {
                Some(event) => EditorEvent::Mouse(event),
                None => EditorEvent::None,
            },
            Event::FocusLost => EditorEvent::FocusLost,
            _ => EditorEvent::None,
        }
    }

    fn process_mouse_event(&mut self, event: crossterm::event::MouseEvent) -> Option<MouseEvent> {
        let kind = match event.kind {
            crossterm::event::MouseEventKind::Down(btn) => {
                MouseEventKind::Down(self.convert_button(btn))
            }
            crossterm::event::MouseEventKind::Up(btn) => {
                MouseEventKind::Up(self.convert_button(btn))
            }
            crossterm::event::MouseEventKind::Drag(btn) => {
                MouseEventKind::Drag(self.convert_button(btn))
            }
            crossterm::event::MouseEventKind::Moved => MouseEventKind::Moved,
            crossterm::event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            crossterm::event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            crossterm::event::MouseEventKind::ScrollLeft
            | crossterm::event::MouseEventKind::ScrollRight => return None,
        };

        // Handle click counting
        if let MouseEventKind::Down(btn) = kind {
            let now = Instant::now();
            let is_multi_click = self.last_click_time.is_some_and(|last_time| {
                now.duration_since(last_time) < Duration::from_millis(500)
                    && self.last_click_pos == (event.column, event.row)
                    && self.last_click_button == Some(btn)
            });

            if is_multi_click {
                self.current_click_count = self.current_click_count.saturating_add(1);
            } else {
                self.current_click_count = 1;
            }

            self.last_click_time = Some(now);
            self.last_click_pos = (event.column, event.row);
            self.last_click_button = Some(btn);
        }

        Some(MouseEvent {
            column: event.column,
            row: event.row,
            kind,
            click_count: self.current_click_count,
        })
    }

    fn convert_button(&self, btn: crossterm::event::MouseButton) -> MouseButton {
        match btn {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }

    fn crossterm_key_to_input(&self, key_event: event::KeyEvent) -> InputEvent {
        let code = key_event.code;
        let modifiers = key_event.modifiers;

        let shift = modifiers.contains(KeyModifiers::SHIFT);
        let alt = modifiers.contains(KeyModifiers::ALT);
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        let key = match code {
            KeyCode::Char(c) => {
                if ctrl && !alt {
                    Key::Ctrl(c.to_ascii_lowercase())
                } else if alt && !ctrl {
                    Key::Alt(c)
                } else {
                    Key::Char(c)
                }
            }
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Delete => Key::Delete,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            KeyCode::Esc => Key::Esc,
            _ => Key::Null,
        };

        InputEvent {
            key,
            shift,
            alt,
            ctrl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn mouse(kind: crossterm::event::MouseEventKind) -> crossterm::event::MouseEvent {
        crossterm::event::MouseEvent {
            kind,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_double_click_detection() {
        let mut handler = EventHandler::new();
        let down = crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left);
        let up = crossterm::event::MouseEventKind::Up(crossterm::event::MouseButton::Left);

        let res1 = handler.process_mouse_event(mouse(down)).unwrap();
        assert_eq!(res1.click_count, 1);
        assert_eq!(res1.kind, MouseEventKind::Down(MouseButton::Left));

        handler.process_mouse_event(mouse(up));
        let res2 = handler.process_mouse_event(mouse(down)).unwrap();
        assert_eq!(res2.click_count, 2);
    }

    #[test]
    fn test_horizontal_scroll_ignored() {
        let mut handler = EventHandler::new();
        assert!(handler
            .process_mouse_event(mouse(crossterm::event::MouseEventKind::ScrollLeft))
            .is_none());
    }

    #[test]
    fn test_key_conversion() {
        let mut handler = EventHandler::new();
        let press = Event::Key(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL));
        assert_eq!(
            handler.convert(press),
            EditorEvent::Input(InputEvent {
                key: Key::Ctrl('s'),
                shift: false,
                alt: false,
                ctrl: true,
            })
        );

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        });
        assert_eq!(handler.convert(release), EditorEvent::None);
        assert_eq!(handler.convert(Event::FocusLost), EditorEvent::FocusLost);
    }
}
