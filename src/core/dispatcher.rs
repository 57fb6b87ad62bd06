use tracing::warn;

use crate::core::app::EditorApp;

/// What to do once the document has been saved (or discarded)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    Nothing,
    NewDocument,
    Quit,
}

/// Action requiring user input
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Open a file
    OpenFile,
    /// Save to a new path, then continue with `then`
    SaveAs { then: AfterSave },
    /// "Save changes? (y/n/c)" before `then`
    ConfirmDiscard { then: AfterSave },
    LoadDictionary,
    SaveDictionary,
    /// "Clear dictionary? (y/n)"
    ConfirmClearDictionary,
    /// `name=value` autocomplete setting
    Configure,
}

impl InputAction {
    /// Confirmation prompts take a single key instead of a line of input
    pub fn is_confirmation(&self) -> bool {
        matches!(
            self,
            InputAction::ConfirmDiscard { .. } | InputAction::ConfirmClearDictionary
        )
    }
}

/// Result of command dispatch
#[derive(Debug, PartialEq)]
pub enum DispatchResult {
    /// Command executed successfully
    Success,
    /// Command not found/handled
    NotHandled,
    /// Exit requested
    Exit,
    /// Command needs user input before completing
    NeedsInput { prompt: String, action: InputAction },
    /// Informational message to display
    Info(String),
}

/// Run a named command, or insert a character.
pub fn dispatch(
    app: &mut EditorApp,
    command_name: Option<&str>,
    insert_char: Option<char>,
) -> DispatchResult {
    if let Some(c) = insert_char {
        app.document.insert_char(c);
        return DispatchResult::Success;
    }

    if let Some(command_str) = command_name {
        if let Some(command_obj) = app.command_registry.get(command_str).cloned() {
            return command_obj.execute(app);
        }
        warn!(command = command_str, "command not found in registry");
        return DispatchResult::NotHandled;
    }

    DispatchResult::NotHandled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn setup_test_app() -> EditorApp {
        EditorApp::new(&Config::default())
    }

    #[test]
    fn test_dispatch_insert_char() {
        let mut app = setup_test_app();
        assert_eq!(dispatch(&mut app, None, Some('a')), DispatchResult::Success);
        assert_eq!(app.document.text(), "a");
    }

    #[test]
    fn test_dispatch_backward_char() {
        let mut app = setup_test_app();
        app.document.insert_char('a');
        let result = dispatch(&mut app, Some("backward-character"), None);
        assert_eq!(result, DispatchResult::Success);
        assert_eq!(app.document.caret(), 0);
    }

    #[test]
    fn test_dispatch_exit() {
        let mut app = setup_test_app();
        assert_eq!(dispatch(&mut app, Some("exit"), None), DispatchResult::Exit);
    }

    #[test]
    fn test_dispatch_unknown() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, Some("unknown-command"), None);
        assert_eq!(result, DispatchResult::NotHandled);
    }

    #[test]
    fn test_confirmation_actions() {
        assert!(InputAction::ConfirmClearDictionary.is_confirmation());
        assert!(
            InputAction::ConfirmDiscard {
                then: AfterSave::Quit
            }
            .is_confirmation()
        );
        assert!(!InputAction::OpenFile.is_confirmation());
    }
}
