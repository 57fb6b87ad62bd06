use crate::core::app::EditorApp;
/// Caret movement commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Move forward one character
#[derive(Clone)]
pub struct ForwardChar;

impl Command for ForwardChar {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_right();
        DispatchResult::Success
    }
}

/// Move backward one character
#[derive(Clone)]
pub struct BackwardChar;

impl Command for BackwardChar {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_left();
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct NextLine;

impl Command for NextLine {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_down();
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct PreviousLine;

impl Command for PreviousLine {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_up();
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct BeginningOfLine;

impl Command for BeginningOfLine {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_home();
        DispatchResult::Success
    }
}

#[derive(Clone)]
pub struct EndOfLine;

impl Command for EndOfLine {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        app.document.move_end();
        DispatchResult::Success
    }
}

/// Scroll forward one screen
#[derive(Clone)]
pub struct ForwardPage;

impl Command for ForwardPage {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        let rows = app.page_rows() as isize;
        app.document.move_lines(rows);
        DispatchResult::Success
    }
}

/// Scroll backward one screen
#[derive(Clone)]
pub struct BackwardPage;

impl Command for BackwardPage {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        let rows = app.page_rows() as isize;
        app.document.move_lines(-rows);
        DispatchResult::Success
    }
}
