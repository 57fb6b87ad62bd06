//! This module defines the central `EditorApp` structure: the document, the
//! completion engine, the suggestion controller and everything the front end
//! needs to draw them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{Config, ConfigValue};
use crate::core::command::Command;
use crate::core::dispatcher::{DispatchResult, InputAction, dispatch};
use crate::core::document::Document;
use crate::core::engine::{CompletionEngine, EngineConfig, EngineError, WordDictionary};
use crate::core::geometry::{CaretScreenMapper, GlyphMetrics, Rect, Scroll};
use crate::core::input::{
    InputEvent, KeyBindings, LookupResult, MouseButton, MouseEvent, MouseEventKind,
};
use crate::core::prompt::{Prompt, PromptResult, handle_prompt_action};
use crate::core::suggest::{DEFAULT_COOLDOWN, EditorHost, KeyOutcome, SuggestionController};
use crate::core::task_queue::TaskQueue;

/// Dictionary file loaded at startup when no other is configured
pub const DEFAULT_DICTIONARY: &str = "dict";

/// Lines moved by one mouse wheel step
const WHEEL_LINES: usize = 3;

/// The document as seen by the suggestion controller
pub struct DocumentView<'a> {
    document: &'a mut Document,
    bounds: Option<Rect>,
    scroll: Scroll,
}

impl EditorHost for DocumentView<'_> {
    fn text(&self) -> String {
        self.document.text()
    }

    fn caret(&self) -> usize {
        self.document.caret()
    }

    fn replace_text_and_move_caret(&mut self, text: String, caret: usize) {
        self.document.replace_text_and_move_caret(&text, caret);
    }

    fn container_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn scroll(&self) -> Scroll {
        self.scroll
    }
}

/// EditorApp: the root application state
pub struct EditorApp {
    pub document: Document,
    /// Bundled completion engine
    pub engine: WordDictionary,
    pub suggestions: SuggestionController,
    /// UI task queue, drained by the main loop
    pub tasks: TaskQueue,
    pub config: Config,
    pub keybindings: KeyBindings,
    /// Registry of commands implementing the Command pattern
    pub command_registry: HashMap<String, Box<dyn Command>>,
    /// Active minibuffer prompt
    pub prompt: Option<Prompt>,
    /// Status/error message to display to user
    pub message: Option<String>,
    /// Screen cells of the text area, unknown until the first layout
    pub text_area: Option<Rect>,
    pub scroll: Scroll,
    /// Last dictionary file loaded or saved, offered as the prompt default
    pub dictionary_path: PathBuf,
    /// The last left click accepted a suggestion
    click_accepted: bool,
}

impl EditorApp {
    /// Build the editor state from `config`. No file is touched here.
    pub fn new(config: &Config) -> Self {
        let engine_config = EngineConfig::from_config(config);
        let mut engine = WordDictionary::new();
        if let Err(e) = engine.configure(engine_config) {
            warn!(error = %e, "ignoring invalid engine settings");
        }

        let cooldown = match config.get("cooldown_ms") {
            Some(ConfigValue::Int(ms)) if *ms >= 0 => Duration::from_millis(*ms as u64),
            _ => DEFAULT_COOLDOWN,
        };
        let mut suggestions = SuggestionController::new(
            CaretScreenMapper::new(GlyphMetrics::terminal(), 0.0),
            cooldown,
        );
        suggestions.set_max_suggestions(engine_config.max_suggestions);

        let mut keybindings = KeyBindings::new();
        for (binding, command) in &config.keybindings {
            if let Err(e) = keybindings.bind(binding, command.clone()) {
                warn!(binding = %binding, error = %e, "ignoring key binding");
            }
        }

        let dictionary_path = config
            .get_string("dictionary")
            .unwrap_or(DEFAULT_DICTIONARY)
            .into();

        let mut app = Self {
            document: Document::new(),
            engine,
            suggestions,
            tasks: TaskQueue::new(),
            config: config.clone(),
            keybindings,
            command_registry: HashMap::new(),
            prompt: None,
            message: None,
            text_area: None,
            scroll: Scroll::default(),
            dictionary_path,
            click_accepted: false,
        };
        crate::core::commands::register_all(&mut app);
        app
    }

    /// Build the editor, load the default dictionary and open `file`.
    pub fn initialize_with_config(config: &Config, file: Option<&Path>) -> Self {
        let mut app = Self::new(config);
        app.load_default_dictionary();

        if let Some(path) = file {
            if path.exists() {
                match Document::open(path) {
                    Ok(document) => app.document = document,
                    Err(e) => app.message = Some(format!("Error opening file: {}", e)),
                }
            } else {
                // New file: saved under this name later
                app.document.path = Some(path.to_path_buf());
            }
        }
        app
    }

    /// Load the configured dictionary if the file exists
    pub fn load_default_dictionary(&mut self) {
        let path = self.dictionary_path.clone();
        if !path.is_file() {
            info!(path = %path.display(), "no default dictionary");
            self.message = Some(format!(
                "Default dictionary file '{}' not found.",
                path.display()
            ));
            return;
        }
        self.message = Some(match self.engine.load_dictionary(&path) {
            Ok(()) => format!("Default dictionary loaded from: {}", path.display()),
            Err(e) => {
                warn!(error = %e, "default dictionary failed to load");
                format!("Error loading default dictionary: {}", e)
            }
        });
    }

    /// Swap in another document, forgetting popup state and scroll
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.suggestions.reset();
        self.scroll = Scroll::default();
    }

    /// Update one autocomplete setting and push it to the engine
    pub fn apply_setting(&mut self, name: &str, raw: &str) -> Result<(), EngineError> {
        let value = ConfigValue::parse(raw);
        EngineConfig::check(name, &value)?;

        let mut config = self.config.clone();
        config.set(name, value);
        let engine_config = EngineConfig::from_config(&config);
        self.engine.configure(engine_config)?;

        self.suggestions.set_max_suggestions(engine_config.max_suggestions);
        self.config = config;
        info!(setting = name, value = raw, "autocomplete setting changed");
        Ok(())
    }

    /// Apply a command result. Returns true when the editor should exit.
    pub fn apply_result(&mut self, result: DispatchResult) -> bool {
        match result {
            DispatchResult::Exit => return true,
            DispatchResult::NeedsInput { prompt, action } => {
                let mut prompt = Prompt::new(prompt, action.clone());
                if matches!(
                    action,
                    InputAction::LoadDictionary | InputAction::SaveDictionary
                ) {
                    prompt = prompt.with_input(self.dictionary_path.display().to_string());
                }
                self.prompt = Some(prompt);
            }
            DispatchResult::Info(message) => self.message = Some(message),
            DispatchResult::Success | DispatchResult::NotHandled => {}
        }
        false
    }

    // ==================== Events ====================

    /// Process one key press. Terminals report no releases, so the release
    /// half (suggestion refresh) runs right after the edit.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> bool {
        if self.prompt.is_some() {
            return self.handle_prompt_input(event);
        }

        let version = self.document.version;
        let mut view = DocumentView {
            document: &mut self.document,
            bounds: self.text_area,
            scroll: self.scroll,
        };
        let outcome = self
            .suggestions
            .handle_key_press(&event.key, &mut view, &mut self.tasks, now);

        if outcome == KeyOutcome::Unhandled {
            let result = match self.keybindings.lookup(event) {
                LookupResult::Command(name) => dispatch(self, Some(&name), None),
                LookupResult::InsertChar(c) => dispatch(self, None, Some(c)),
                LookupResult::Unbound => DispatchResult::NotHandled,
            };
            if self.apply_result(result) {
                return true;
            }
        }

        if self.document.version != version {
            // Typing replaces stale status messages
            self.message = None;
        }
        self.ensure_caret_visible();

        if self.prompt.is_some() {
            self.suggestions.dismiss(&mut self.tasks, now);
            return false;
        }

        let mut view = DocumentView {
            document: &mut self.document,
            bounds: self.text_area,
            scroll: self.scroll,
        };
        self.suggestions
            .on_key_release(&event.key, &mut view, &self.engine, &mut self.tasks, now);
        false
    }

    fn handle_prompt_input(&mut self, event: &InputEvent) -> bool {
        let Some(prompt) = self.prompt.as_mut() else {
            return false;
        };
        match prompt.handle_key(event) {
            PromptResult::Continue => false,
            PromptResult::Cancelled => {
                self.prompt = None;
                self.message = Some("Cancelled".to_string());
                false
            }
            PromptResult::Confirmed(input) => {
                let action = prompt.action.clone();
                self.prompt = None;
                let result = handle_prompt_action(self, action, input);
                self.apply_result(result)
            }
        }
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent, now: Instant) {
        if self.prompt.is_some() {
            return;
        }
        let (x, y) = (event.column as f32, event.row as f32);
        match event.kind {
            MouseEventKind::Moved => {
                self.suggestions.hover(x, y);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // The first click of a double-click already accepted; the
                // second lands on the text the popup was covering.
                if event.click_count >= 2 && self.click_accepted {
                    return;
                }
                let mut view = DocumentView {
                    document: &mut self.document,
                    bounds: self.text_area,
                    scroll: self.scroll,
                };
                self.click_accepted = self.suggestions.click(x, y, &mut view, &mut self.tasks, now);
                if self.click_accepted {
                    self.message = None;
                    self.ensure_caret_visible();
                    return;
                }
                self.suggestions.dismiss(&mut self.tasks, now);
                if let Some(area) = self.text_area.filter(|a| a.contains_point(x, y)) {
                    let line = self.scroll.line + (y - area.y) as usize;
                    let column = self.scroll.column + (x - area.x) as usize;
                    self.document.set_caret_line_col(line, column);
                }
            }
            MouseEventKind::ScrollUp => {
                self.suggestions.dismiss(&mut self.tasks, now);
                self.scroll.line = self.scroll.line.saturating_sub(WHEEL_LINES);
            }
            MouseEventKind::ScrollDown => {
                self.suggestions.dismiss(&mut self.tasks, now);
                let last = self.document.line_count().saturating_sub(1);
                self.scroll.line = (self.scroll.line + WHEEL_LINES).min(last);
            }
            _ => {}
        }
    }

    /// New text area geometry from the front end
    pub fn set_text_area(&mut self, area: Rect, now: Instant) {
        if self.text_area == Some(area) {
            return;
        }
        self.text_area = Some(area);
        self.suggestions.on_container_resized(&mut self.tasks, now);
        self.ensure_caret_visible();
    }

    pub fn on_focus_lost(&mut self, now: Instant) {
        self.suggestions.on_focus_lost(&mut self.tasks, now);
    }

    /// Drain the task queue. Returns true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for message in self.tasks.drain(now) {
            changed |= self.suggestions.on_message(&message);
        }
        changed
    }

    /// Scroll so the caret stays inside the text area
    pub fn ensure_caret_visible(&mut self) {
        let Some(area) = self.text_area else {
            return;
        };
        let rows = (area.height as usize).max(1);
        let cols = (area.width as usize).max(1);
        let (line, column) = self.document.caret_line_col();

        if line < self.scroll.line {
            self.scroll.line = line;
        } else if line >= self.scroll.line + rows {
            self.scroll.line = line + 1 - rows;
        }
        if column < self.scroll.column {
            self.scroll.column = column;
        } else if column >= self.scroll.column + cols {
            self.scroll.column = column + 1 - cols;
        }
    }

    /// Rows moved by a page command
    pub fn page_rows(&self) -> usize {
        self.text_area
            .map(|a| (a.height as usize).saturating_sub(1).max(1))
            .unwrap_or(20)
    }

    // ==================== Status ====================

    /// Bottom line: the latest message, or file state
    pub fn status_line(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let mut status = match &self.document.path {
            Some(_) => format!("File: {}", self.document.display_name()),
            None => "Ready".to_string(),
        };
        if self.document.modified {
            status.push_str(" (Modified)");
        }
        status
    }

    /// Top line: `<name> - typeahead`, starred when modified
    pub fn title_line(&self) -> String {
        let mut title = format!("{} - typeahead", self.document.display_name());
        if self.document.modified {
            title.push_str(" *");
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crate::core::suggest::Visibility;

    fn app_with(words: &str) -> EditorApp {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        let mut app = EditorApp::new(&config);
        app.engine.add_text(words);
        app.set_text_area(Rect::new(0.0, 1.0, 80.0, 22.0), Instant::now());
        app
    }

    fn type_keys(app: &mut EditorApp, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_input(&InputEvent::plain(Key::Char(c)), now);
        }
    }

    #[test]
    fn test_app_new() {
        let app = EditorApp::new(&Config::default());
        assert!(app.document.is_empty());
        assert_eq!(app.status_line(), "Ready");
        assert_eq!(app.title_line(), "Untitled - typeahead");
    }

    #[test]
    fn test_typing_shows_suggestions() {
        let mut app = app_with("world work word");
        type_keys(&mut app, "wor", Instant::now());
        assert!(app.suggestions.is_shown());
        assert_eq!(app.suggestions.candidates().len(), 3);
        assert_eq!(app.title_line(), "Untitled - typeahead *");
        assert_eq!(app.status_line(), "Ready (Modified)");
    }

    #[test]
    fn test_tab_accepts_and_cools_down() {
        let mut app = app_with("world world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        app.handle_input(&InputEvent::plain(Key::Tab), now);
        assert_eq!(app.document.text(), "world");
        assert_eq!(app.document.caret(), 5);
        assert!(matches!(
            app.suggestions.visibility(),
            Visibility::CoolingDown { .. }
        ));

        // typing during cooldown is suppressed until the timer message lands
        type_keys(&mut app, " wo", now);
        assert!(!app.suggestions.is_shown());
        assert!(app.tick(now + DEFAULT_COOLDOWN));
        app.handle_input(&InputEvent::plain(Key::Char('r')), now + DEFAULT_COOLDOWN);
        assert!(app.suggestions.is_shown());
    }

    #[test]
    fn test_tab_inserts_when_hidden() {
        let mut app = app_with("");
        app.handle_input(&InputEvent::plain(Key::Tab), Instant::now());
        assert_eq!(app.document.text(), "\t");
    }

    #[test]
    fn test_arrows_navigate_popup_not_caret() {
        let mut app = app_with("world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        app.handle_input(&InputEvent::plain(Key::Down), now);
        assert_eq!(app.document.caret(), 3);
        assert_eq!(app.suggestions.candidates().selected_index(), Some(1));
    }

    #[test]
    fn test_prompt_dismisses_popup() {
        let mut app = app_with("world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        let ctrl_o = InputEvent {
            ctrl: true,
            ..InputEvent::plain(Key::Ctrl('o'))
        };
        app.handle_input(&ctrl_o, now);
        assert!(app.prompt.is_some());
        assert!(!app.suggestions.is_shown());
    }

    #[test]
    fn test_focus_lost_hides() {
        let mut app = app_with("world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        app.on_focus_lost(now);
        assert!(!app.suggestions.is_shown());
    }

    #[test]
    fn test_click_on_popup_accepts() {
        let mut app = app_with("world world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        let rect = app.suggestions.popup_rect().unwrap();
        app.handle_mouse(
            &MouseEvent {
                column: rect.x as u16 + 1,
                row: rect.y as u16 + 1,
                kind: MouseEventKind::Down(MouseButton::Left),
                click_count: 1,
            },
            now,
        );
        assert_eq!(app.document.text(), "world");
    }

    #[test]
    fn test_double_click_on_popup_accepts_once() {
        let mut app = app_with("world world work");
        let now = Instant::now();
        type_keys(&mut app, "wor", now);
        let rect = app.suggestions.popup_rect().unwrap();
        let click = |click_count| MouseEvent {
            column: rect.x as u16 + 1,
            row: rect.y as u16 + 1,
            kind: MouseEventKind::Down(MouseButton::Left),
            click_count,
        };

        app.handle_mouse(&click(1), now);
        assert_eq!(app.document.text(), "world");
        assert_eq!(app.document.caret(), 5);

        // The second half lands on the text under the closed popup
        app.handle_mouse(&click(2), now);
        assert_eq!(app.document.caret(), 5);
        assert_eq!(app.document.text(), "world");
    }

    #[test]
    fn test_double_click_on_text_moves_caret() {
        let mut app = app_with("");
        let now = Instant::now();
        type_keys(&mut app, "abc", now);
        app.handle_mouse(
            &MouseEvent {
                column: 1,
                row: 1,
                kind: MouseEventKind::Down(MouseButton::Left),
                click_count: 2,
            },
            now,
        );
        assert_eq!(app.document.caret(), 1);
    }

    #[test]
    fn test_scroll_follows_caret() {
        let mut app = app_with("");
        let now = Instant::now();
        for _ in 0..30 {
            app.handle_input(&InputEvent::plain(Key::Enter), now);
        }
        assert_eq!(app.scroll.line, 30 + 1 - 22);
    }

    #[test]
    fn test_apply_setting() {
        let mut app = app_with("");
        app.apply_setting("max_suggestions", "4").unwrap();
        assert_eq!(app.suggestions.max_suggestions(), 4);
        assert!(app.apply_setting("max_suggestions", "0").is_err());
        assert_eq!(app.suggestions.max_suggestions(), 4);
    }

    #[test]
    fn test_missing_default_dictionary_message() {
        let mut config = Config::default();
        config.set("dictionary", "/nonexistent/typeahead-dict");
        let app = EditorApp::initialize_with_config(&config, None);
        assert_eq!(
            app.status_line(),
            "Default dictionary file '/nonexistent/typeahead-dict' not found."
        );
    }
}
