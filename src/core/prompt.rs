//! Minibuffer prompt and the actions it completes

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::app::EditorApp;
use crate::core::dispatcher::{AfterSave, DispatchResult, InputAction};
use crate::core::document::Document;
use crate::core::engine::CompletionEngine;
use crate::core::input::{InputEvent, Key};
use crate::core::word::byte_offset;

/// Result of feeding a key to the prompt
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    Continue,
    Confirmed(String),
    Cancelled,
}

/// Single-line input shown in place of the status line
#[derive(Debug, Clone)]
pub struct Prompt {
    pub label: String,
    pub input: String,
    /// Cursor as a character index into `input`
    cursor: usize,
    pub action: InputAction,
}

impl Prompt {
    pub fn new(label: impl Into<String>, action: InputAction) -> Self {
        Self {
            label: label.into(),
            input: String::new(),
            cursor: 0,
            action,
        }
    }

    /// Pre-fill the input, cursor at the end
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self.cursor = self.input.chars().count();
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, event: &InputEvent) -> PromptResult {
        if self.action.is_confirmation() {
            return match event.key {
                Key::Esc | Key::Ctrl('g') => PromptResult::Cancelled,
                Key::Char(c) => PromptResult::Confirmed(c.to_string()),
                _ => PromptResult::Continue,
            };
        }

        match event.key {
            Key::Enter => return PromptResult::Confirmed(self.input.clone()),
            Key::Esc | Key::Ctrl('g') => return PromptResult::Cancelled,
            Key::Backspace if self.cursor > 0 => {
                let at = byte_offset(&self.input, self.cursor - 1);
                self.input.remove(at);
                self.cursor -= 1;
            }
            Key::Delete if self.cursor < self.input.chars().count() => {
                let at = byte_offset(&self.input, self.cursor);
                self.input.remove(at);
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.input.chars().count()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.input.chars().count(),
            Key::Char(c) if !event.ctrl && !event.alt => {
                let at = byte_offset(&self.input, self.cursor);
                self.input.insert(at, c);
                self.cursor += 1;
            }
            _ => {}
        }
        PromptResult::Continue
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_yes(input: &str) -> bool {
    input.eq_ignore_ascii_case("y")
}

/// Finish whatever was waiting on a save (or a discard)
pub fn after_save(app: &mut EditorApp, then: AfterSave) -> DispatchResult {
    match then {
        AfterSave::Nothing => match &app.document.path {
            Some(path) => DispatchResult::Info(format!("Wrote {}", file_label(path))),
            None => DispatchResult::Success,
        },
        AfterSave::NewDocument => {
            app.replace_document(Document::new());
            DispatchResult::Success
        }
        AfterSave::Quit => DispatchResult::Exit,
    }
}

/// Save the document, prompting for a path when it has none
pub fn save_then(app: &mut EditorApp, then: AfterSave) -> DispatchResult {
    if app.document.path.is_none() {
        return DispatchResult::NeedsInput {
            prompt: "Save as: ".to_string(),
            action: InputAction::SaveAs { then },
        };
    }
    match app.document.save() {
        Ok(()) => after_save(app, then),
        Err(e) => {
            warn!(error = %e, "save failed");
            DispatchResult::Info(format!("Error saving file: {}", e))
        }
    }
}

/// Handle a completed prompt
pub fn handle_prompt_action(app: &mut EditorApp, action: InputAction, input: String) -> DispatchResult {
    let input = input.trim().to_string();
    match action {
        InputAction::OpenFile => {
            if input.is_empty() {
                return DispatchResult::Success;
            }
            match Document::open(&input) {
                Ok(document) => {
                    app.replace_document(document);
                    DispatchResult::Info(format!("Opened {}", input))
                }
                Err(e) => {
                    warn!(error = %e, "open failed");
                    DispatchResult::Info(format!("Error opening file: {}", e))
                }
            }
        }
        InputAction::SaveAs { then } => {
            if input.is_empty() {
                return DispatchResult::Success;
            }
            match app.document.save_as(&input) {
                Ok(()) => after_save(app, then),
                Err(e) => {
                    warn!(error = %e, "save failed");
                    DispatchResult::Info(format!("Error saving file: {}", e))
                }
            }
        }
        InputAction::ConfirmDiscard { then } => match input.to_ascii_lowercase().as_str() {
            "y" => save_then(app, then),
            "n" => after_save(app, then),
            _ => DispatchResult::Info("Cancelled".to_string()),
        },
        InputAction::LoadDictionary => {
            if input.is_empty() {
                return DispatchResult::Success;
            }
            let path = PathBuf::from(&input);
            match app.engine.load_dictionary(&path) {
                Ok(()) => {
                    app.dictionary_path = path.clone();
                    DispatchResult::Info(format!("Dictionary loaded from: {}", file_label(&path)))
                }
                Err(e) => {
                    warn!(error = %e, "dictionary load failed");
                    DispatchResult::Info(format!("Error loading dictionary: {}", e))
                }
            }
        }
        InputAction::SaveDictionary => {
            if input.is_empty() {
                return DispatchResult::Success;
            }
            let path = PathBuf::from(&input);
            match app.engine.save_dictionary(&path) {
                Ok(()) => {
                    app.dictionary_path = path.clone();
                    DispatchResult::Info(format!("Dictionary saved to: {}", file_label(&path)))
                }
                Err(e) => {
                    warn!(error = %e, "dictionary save failed");
                    DispatchResult::Info(format!("Error saving dictionary: {}", e))
                }
            }
        }
        InputAction::ConfirmClearDictionary => {
            if is_yes(&input) {
                app.engine.clear();
                info!("dictionary cleared");
                DispatchResult::Info("Dictionary cleared".to_string())
            } else {
                DispatchResult::Success
            }
        }
        InputAction::Configure => {
            let Some((name, value)) = input.split_once('=') else {
                return DispatchResult::Info("Format: name=value".to_string());
            };
            match app.apply_setting(name.trim(), value.trim()) {
                Ok(()) => DispatchResult::Info("Autocomplete settings updated".to_string()),
                Err(e) => DispatchResult::Info(format!("Error: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn type_str(prompt: &mut Prompt, s: &str) {
        for c in s.chars() {
            prompt.handle_key(&InputEvent::plain(Key::Char(c)));
        }
    }

    #[test]
    fn test_prompt_editing() {
        let mut prompt = Prompt::new("Find file: ", InputAction::OpenFile);
        type_str(&mut prompt, "nöte.txt");
        prompt.handle_key(&InputEvent::plain(Key::Home));
        prompt.handle_key(&InputEvent::plain(Key::Delete));
        prompt.handle_key(&InputEvent::plain(Key::End));
        prompt.handle_key(&InputEvent::plain(Key::Backspace));
        assert_eq!(prompt.input, "öte.tx");
        assert_eq!(
            prompt.handle_key(&InputEvent::plain(Key::Enter)),
            PromptResult::Confirmed("öte.tx".to_string())
        );
    }

    #[test]
    fn test_prompt_cancel() {
        let mut prompt = Prompt::new("Save as: ", InputAction::SaveAs {
            then: AfterSave::Nothing,
        });
        assert_eq!(
            prompt.handle_key(&InputEvent::plain(Key::Esc)),
            PromptResult::Cancelled
        );
    }

    #[test]
    fn test_confirmation_takes_one_key() {
        let mut prompt = Prompt::new("Clear dictionary? (y/n)", InputAction::ConfirmClearDictionary);
        assert_eq!(
            prompt.handle_key(&InputEvent::plain(Key::Char('y'))),
            PromptResult::Confirmed("y".to_string())
        );
    }

    #[test]
    fn test_discard_no_quits() {
        let mut app = EditorApp::new(&Config::default());
        app.document.insert_char('x');
        let result = handle_prompt_action(
            &mut app,
            InputAction::ConfirmDiscard {
                then: AfterSave::Quit,
            },
            "n".to_string(),
        );
        assert_eq!(result, DispatchResult::Exit);
    }

    #[test]
    fn test_discard_yes_untitled_asks_for_path() {
        let mut app = EditorApp::new(&Config::default());
        app.document.insert_char('x');
        let result = handle_prompt_action(
            &mut app,
            InputAction::ConfirmDiscard {
                then: AfterSave::NewDocument,
            },
            "y".to_string(),
        );
        assert_eq!(
            result,
            DispatchResult::NeedsInput {
                prompt: "Save as: ".to_string(),
                action: InputAction::SaveAs {
                    then: AfterSave::NewDocument
                },
            }
        );
    }

    #[test]
    fn test_save_as_then_new_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut app = EditorApp::new(&Config::default());
        app.document.insert_char('x');

        let result = handle_prompt_action(
            &mut app,
            InputAction::SaveAs {
                then: AfterSave::NewDocument,
            },
            path.display().to_string(),
        );
        assert_eq!(result, DispatchResult::Success);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
        assert!(app.document.is_empty());
        assert_eq!(app.document.path, None);
    }

    #[test]
    fn test_dictionary_round_trip_through_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        let mut app = EditorApp::new(&Config::default());
        app.engine.add_text("hello help");

        let result = handle_prompt_action(
            &mut app,
            InputAction::SaveDictionary,
            path.display().to_string(),
        );
        assert_eq!(result, DispatchResult::Info("Dictionary saved to: words".to_string()));

        handle_prompt_action(&mut app, InputAction::ConfirmClearDictionary, "y".to_string());
        assert!(app.engine.query("hel", 5).unwrap().is_empty());

        let result = handle_prompt_action(
            &mut app,
            InputAction::LoadDictionary,
            path.display().to_string(),
        );
        assert_eq!(
            result,
            DispatchResult::Info("Dictionary loaded from: words".to_string())
        );
        assert_eq!(app.engine.query("hel", 5).unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_dictionary_reports() {
        let mut app = EditorApp::new(&Config::default());
        let result = handle_prompt_action(
            &mut app,
            InputAction::LoadDictionary,
            "/nonexistent/typeahead/dict".to_string(),
        );
        assert!(matches!(result, DispatchResult::Info(msg) if msg.starts_with("Error loading dictionary")));
    }

    #[test]
    fn test_configure_prompt() {
        let mut app = EditorApp::new(&Config::default());
        let result = handle_prompt_action(&mut app, InputAction::Configure, "max_suggestions = 3".into());
        assert_eq!(result, DispatchResult::Info("Autocomplete settings updated".to_string()));
        assert_eq!(app.suggestions.max_suggestions(), 3);

        let result = handle_prompt_action(&mut app, InputAction::Configure, "tolerance=99".into());
        assert!(matches!(result, DispatchResult::Info(msg) if msg.starts_with("Error")));

        let result = handle_prompt_action(&mut app, InputAction::Configure, "tolerance".into());
        assert_eq!(result, DispatchResult::Info("Format: name=value".to_string()));
    }
}
