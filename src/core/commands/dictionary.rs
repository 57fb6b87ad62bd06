use tracing::info;

use crate::core::app::EditorApp;
/// Completion dictionary commands
use crate::core::command::Command;
use crate::core::dispatcher::{DispatchResult, InputAction};
use crate::core::engine::CompletionEngine;

/// Merge a dictionary file into the engine (prompts)
#[derive(Clone)]
pub struct LoadDictionary;

impl Command for LoadDictionary {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Load dictionary: ".to_string(),
            action: InputAction::LoadDictionary,
        }
    }
}

/// Write the engine's words to a file (prompts)
#[derive(Clone)]
pub struct SaveDictionary;

impl Command for SaveDictionary {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Save dictionary: ".to_string(),
            action: InputAction::SaveDictionary,
        }
    }
}

/// Learn every word of the current document
#[derive(Clone)]
pub struct AddTextToDictionary;

impl Command for AddTextToDictionary {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        if app.document.is_empty() {
            return DispatchResult::Success;
        }
        app.engine.add_text(&app.document.text());
        info!("current text added to dictionary");
        DispatchResult::Info("Current text added to dictionary".to_string())
    }
}

/// Forget all words (asks first)
#[derive(Clone)]
pub struct ClearDictionary;

impl Command for ClearDictionary {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Clear dictionary? (y/n) ".to_string(),
            action: InputAction::ConfirmClearDictionary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::document::Document;

    #[test]
    fn test_add_text() {
        let mut app = EditorApp::new(&Config::default());
        app.document = Document::from_string("Rust rusty rustacean");
        assert_eq!(
            AddTextToDictionary.execute(&mut app),
            DispatchResult::Info("Current text added to dictionary".to_string())
        );
        let words: Vec<String> = app
            .engine
            .query("rus", 10)
            .unwrap()
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["rust", "rusty", "rustacean"]);
    }

    #[test]
    fn test_add_empty_text_is_silent() {
        let mut app = EditorApp::new(&Config::default());
        assert_eq!(AddTextToDictionary.execute(&mut app), DispatchResult::Success);
        assert_eq!(app.engine.len(), 0);
    }
}
