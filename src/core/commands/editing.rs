use crate::core::app::EditorApp;
/// Basic editing commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Insert newline at the caret
#[derive(Clone)]
pub struct InsertNewline;

impl Command for InsertNewline {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.insert_newline();
        DispatchResult::Success
    }
}

/// Insert a literal tab
#[derive(Clone)]
pub struct InsertTab;

impl Command for InsertTab {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.insert_char('\t');
        DispatchResult::Success
    }
}

/// Delete the character before the caret (Backspace)
#[derive(Clone)]
pub struct DeletePreviousChar;

impl Command for DeletePreviousChar {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.backspace();
        DispatchResult::Success
    }
}

/// Delete the character under the caret
#[derive(Clone)]
pub struct DeleteNextChar;

impl Command for DeleteNextChar {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.delete();
        DispatchResult::Success
    }
}
