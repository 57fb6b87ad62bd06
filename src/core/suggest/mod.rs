//! Suggestion Controller
//!
//! Decides, on every qualifying key release, whether the completion popup is
//! shown, what it lists and where it sits. Suggestions are best effort: no
//! failure in here reaches the editor, it only hides the popup.
//!
//! Refreshing is split into [`SuggestionController::begin_query`] and
//! [`SuggestionController::complete_query`]. A result is only applied when
//! its ticket is the newest one, the popup is not cooling down and the word
//! at the caret is still the word that was queried.

pub mod accept;
pub mod candidates;
pub mod gate;

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::core::engine::{Candidate, CompletionEngine, EngineError};
use crate::core::geometry::{CaretScreenMapper, Rect, Scroll, Size};
use crate::core::input::{Key, KeyClass};
use crate::core::task_queue::UiMessage;
use crate::core::task_queue::TaskQueue;
use crate::core::word::{self, WordSpan};

pub use candidates::{CandidateList, POPUP_BORDER, PopupLimits};
pub use gate::{DEFAULT_COOLDOWN, Visibility, VisibilityGate};

/// What the controller needs from the text widget
pub trait EditorHost {
    /// Full document text
    fn text(&self) -> String;

    /// Caret position as a character index
    fn caret(&self) -> usize;

    fn replace_text_and_move_caret(&mut self, text: String, caret: usize);

    /// Screen rectangle of the text area, `None` before layout
    fn container_bounds(&self) -> Option<Rect>;

    /// First visible line/column of the text area
    fn scroll(&self) -> Scroll {
        Scroll::default()
    }
}

/// Faults absorbed by the controller
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("completion engine fault: {0}")]
    EngineFault(#[from] EngineError),
    #[error("popup position unavailable")]
    LayoutUnavailable,
}

/// Outcome of a key release, mostly interesting to tests and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Navigation or function key, nothing done
    NotQualifying,
    /// Cooling down, pipeline skipped
    Suppressed,
    /// Popup hidden or left hidden
    Hidden,
    /// Popup shown with fresh candidates
    Shown,
    /// Engine result arrived for an outdated query and was dropped
    Discarded,
}

/// Whether a key press was taken by the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Unhandled,
}

/// Identifies one engine query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    id: u64,
    pub word: String,
    pub span: WordSpan,
}

#[derive(Debug)]
pub struct SuggestionController {
    gate: VisibilityGate,
    candidates: CandidateList,
    mapper: CaretScreenMapper,
    limits: PopupLimits,
    max_suggestions: usize,
    next_ticket: u64,
    latest_ticket: Option<u64>,
}

impl SuggestionController {
    pub fn new(mapper: CaretScreenMapper, cooldown: Duration) -> Self {
        Self {
            gate: VisibilityGate::new(cooldown),
            candidates: CandidateList::new(),
            mapper,
            limits: PopupLimits::default(),
            max_suggestions: 10,
            next_ticket: 0,
            latest_ticket: None,
        }
    }

    pub fn with_limits(mut self, limits: PopupLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn set_max_suggestions(&mut self, max: usize) {
        self.max_suggestions = max.max(1);
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn visibility(&self) -> Visibility {
        self.gate.state()
    }

    pub fn is_shown(&self) -> bool {
        self.gate.is_shown()
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn limits(&self) -> PopupLimits {
        self.limits
    }

    fn popup_size(&self, items: &[String]) -> Size {
        let (columns, rows) = CandidateList::popup_cells(items, self.limits);
        Size::new(
            columns as f32 * self.mapper.metrics.char_width,
            rows as f32 * self.mapper.metrics.line_height,
        )
    }

    /// Screen rectangle of the popup while shown
    pub fn popup_rect(&self) -> Option<Rect> {
        let anchor = self.gate.anchor()?;
        Some(Rect::at(anchor, self.popup_size(self.candidates.items())))
    }

    /// Candidate index under a screen position, if the popup is shown there
    pub fn row_at(&self, x: f32, y: f32) -> Option<usize> {
        let rect = self.popup_rect()?;
        let line_height = self.mapper.metrics.line_height;
        let inner = Rect::new(
            rect.x,
            rect.y + line_height,
            rect.width,
            rect.height - POPUP_BORDER as f32 * line_height,
        );
        if !inner.contains_point(x, y) {
            return None;
        }
        let row = ((y - inner.y) / line_height) as usize;
        let index = self.candidates.top() + row;
        (index < self.candidates.len()).then_some(index)
    }

    // ==================== Keyboard ====================

    /// Key press routing while the popup is open. Everything is unhandled
    /// while the popup is not shown.
    pub fn handle_key_press(
        &mut self,
        key: &Key,
        host: &mut dyn EditorHost,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> KeyOutcome {
        if !self.gate.is_shown() {
            return KeyOutcome::Unhandled;
        }
        match key {
            Key::Up => {
                self.candidates.select_prev();
                self.candidates.scroll_top(self.limits.max_rows);
            }
            Key::Down => {
                self.candidates.select_next();
                self.candidates.scroll_top(self.limits.max_rows);
            }
            Key::Tab => {
                self.accept_selected(host, queue, now);
            }
            Key::Esc => {
                self.dismiss(queue, now);
            }
            _ => return KeyOutcome::Unhandled,
        }
        KeyOutcome::Consumed
    }

    /// Key release: refresh suggestions unless it is a navigation or
    /// function key.
    pub fn on_key_release(
        &mut self,
        key: &Key,
        host: &mut dyn EditorHost,
        engine: &dyn CompletionEngine,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> Refresh {
        if key.class() != KeyClass::Edit {
            return Refresh::NotQualifying;
        }
        self.refresh(host, engine, queue, now)
    }

    // ==================== Mouse ====================

    /// Highlight the row under the pointer
    pub fn hover(&mut self, x: f32, y: f32) -> bool {
        match self.row_at(x, y) {
            Some(index) => self.candidates.select(index),
            None => false,
        }
    }

    /// Click on a popup row commits it. Returns false when the click missed.
    pub fn click(
        &mut self,
        x: f32,
        y: f32,
        host: &mut dyn EditorHost,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> bool {
        let Some(index) = self.row_at(x, y) else {
            return false;
        };
        self.candidates.select(index);
        self.accept_selected(host, queue, now);
        true
    }

    // ==================== Pipeline ====================

    /// Run the whole pipeline synchronously: scan, query, show or hide.
    pub fn refresh(
        &mut self,
        host: &mut dyn EditorHost,
        engine: &dyn CompletionEngine,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> Refresh {
        if self.gate.is_cooling_down() {
            debug!("suggestion refresh suppressed by cooldown");
            return Refresh::Suppressed;
        }

        let Some(ticket) = self.begin_query(&*host) else {
            self.dismiss(queue, now);
            return Refresh::Hidden;
        };
        let result = engine.query(&ticket.word, self.max_suggestions);
        self.complete_query(ticket, result, host, queue, now)
    }

    /// Scan the word at the caret and issue a ticket for it. `None` when
    /// the span is empty or the popup is cooling down.
    pub fn begin_query(&mut self, host: &dyn EditorHost) -> Option<QueryTicket> {
        if self.gate.is_cooling_down() {
            return None;
        }
        let text = host.text();
        let span = word::scan(&text, host.caret());
        if span.is_empty() {
            return None;
        }

        self.next_ticket += 1;
        self.latest_ticket = Some(self.next_ticket);
        Some(QueryTicket {
            id: self.next_ticket,
            word: span.slice(&text).to_string(),
            span,
        })
    }

    fn is_stale(&self, ticket: &QueryTicket, text: &str, caret: usize) -> bool {
        if self.latest_ticket != Some(ticket.id) || self.gate.is_cooling_down() {
            return true;
        }
        let span = word::scan(text, caret);
        span != ticket.span || span.slice(text) != ticket.word
    }

    /// Apply an engine result. Outdated results are dropped without touching
    /// the popup; failures hide it.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<Candidate>, EngineError>,
        host: &mut dyn EditorHost,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> Refresh {
        let text = host.text();
        let caret = host.caret();
        if self.is_stale(&ticket, &text, caret) {
            debug!(word = %ticket.word, "discarding stale completion result");
            return Refresh::Discarded;
        }
        self.latest_ticket = None;

        match self.try_show(result, &text, caret, &*host) {
            Ok(true) => Refresh::Shown,
            Ok(false) => {
                self.dismiss(queue, now);
                Refresh::Hidden
            }
            Err(e) => {
                debug!(word = %ticket.word, error = %e, "hiding suggestions");
                self.dismiss(queue, now);
                Refresh::Hidden
            }
        }
    }

    /// Everything fallible happens before the list and anchor are committed
    /// together.
    fn try_show(
        &mut self,
        result: Result<Vec<Candidate>, EngineError>,
        text: &str,
        caret: usize,
        host: &dyn EditorHost,
    ) -> Result<bool, SuggestError> {
        let words: Vec<String> = result?.into_iter().map(|c| c.word).collect();
        if words.is_empty() {
            return Ok(false);
        }

        let size = self.popup_size(&words);
        let anchor = self
            .mapper
            .map(text, caret, host.scroll(), host.container_bounds(), size)
            .ok_or(SuggestError::LayoutUnavailable)?;

        self.candidates.replace(words);
        Ok(self.gate.show(anchor))
    }

    // ==================== Dismissal ====================

    /// Hide the popup (arming the cooldown) if it is shown
    pub fn dismiss(&mut self, queue: &mut TaskQueue, now: Instant) -> bool {
        if self.gate.hide(queue, now) {
            self.candidates.clear();
            true
        } else {
            false
        }
    }

    pub fn on_focus_lost(&mut self, queue: &mut TaskQueue, now: Instant) {
        self.dismiss(queue, now);
    }

    pub fn on_container_resized(&mut self, queue: &mut TaskQueue, now: Instant) {
        self.dismiss(queue, now);
    }

    /// Commit the selected candidate and dismiss. No-op without a selection.
    pub fn accept_selected(
        &mut self,
        host: &mut dyn EditorHost,
        queue: &mut TaskQueue,
        now: Instant,
    ) -> bool {
        if !self.gate.is_shown() {
            return false;
        }
        let Some(chosen) = self.candidates.selected().map(str::to_string) else {
            return false;
        };
        let Some((text, caret)) = accept::accept(&host.text(), host.caret(), &chosen) else {
            return false;
        };
        host.replace_text_and_move_caret(text, caret);
        self.dismiss(queue, now);
        true
    }

    /// Forget everything, e.g. when the document is replaced
    pub fn reset(&mut self) {
        self.gate.reset();
        self.candidates.clear();
        self.latest_ticket = None;
    }

    /// Feed a drained UI message. Returns true when the state changed.
    pub fn on_message(&mut self, message: &UiMessage) -> bool {
        match message {
            UiMessage::CooldownElapsed(generation) => self.gate.on_cooldown_elapsed(*generation),
        }
    }
}
