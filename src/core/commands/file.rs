use crate::core::app::EditorApp;
/// Document file commands
use crate::core::command::Command;
use crate::core::dispatcher::{AfterSave, DispatchResult, InputAction};
use crate::core::document::Document;
use crate::core::prompt::save_then;

/// Ask about unsaved changes before `then`, or go straight ahead
fn confirm_discard(app: &mut EditorApp, then: AfterSave) -> Option<DispatchResult> {
    app.document.modified.then(|| DispatchResult::NeedsInput {
        prompt: "Save changes? (y/n/c) ".to_string(),
        action: InputAction::ConfirmDiscard { then },
    })
}

/// Start an empty, untitled document
#[derive(Clone)]
pub struct NewFile;

impl Command for NewFile {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        if let Some(ask) = confirm_discard(app, AfterSave::NewDocument) {
            return ask;
        }
        app.replace_document(Document::new());
        DispatchResult::Success
    }
}

/// Open a file (prompts for filename)
#[derive(Clone)]
pub struct FindFile;

impl Command for FindFile {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Find file: ".to_string(),
            action: InputAction::OpenFile,
        }
    }
}

/// Save the document, prompting for a name when untitled
#[derive(Clone)]
pub struct SaveFile;

impl Command for SaveFile {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        save_then(app, AfterSave::Nothing)
    }
}

/// Save under a new name (prompts)
#[derive(Clone)]
pub struct SaveFileAs;

impl Command for SaveFileAs {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::NeedsInput {
            prompt: "Save as: ".to_string(),
            action: InputAction::SaveAs {
                then: AfterSave::Nothing,
            },
        }
    }
}
