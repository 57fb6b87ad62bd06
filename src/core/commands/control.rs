use crate::core::app::EditorApp;
/// Application control commands
use crate::core::command::Command;
use crate::core::dispatcher::{AfterSave, DispatchResult, InputAction};

/// Exit, asking about unsaved changes first
#[derive(Clone)]
pub struct Exit;

impl Command for Exit {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        if app.document.modified {
            return DispatchResult::NeedsInput {
                prompt: "Save changes? (y/n/c) ".to_string(),
                action: InputAction::ConfirmDiscard {
                    then: AfterSave::Quit,
                },
            };
        }
        DispatchResult::Exit
    }
}

/// Change an autocomplete setting (prompts for `name=value`)
#[derive(Clone)]
pub struct Configure;

impl Command for Configure {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult {
        let engine = app.engine.config();
        DispatchResult::NeedsInput {
            prompt: format!(
                "Setting (max_suggestions={} tolerance_threshold={} tolerance={} similar_weight={} original_weight={}): ",
                engine.max_suggestions,
                engine.tolerance_threshold,
                engine.tolerance,
                engine.similar_weight,
                engine.original_weight
            ),
            action: InputAction::Configure,
        }
    }
}

/// Show a short help line
#[derive(Clone)]
pub struct About;

impl Command for About {
    fn execute(&self, _app: &mut EditorApp) -> DispatchResult {
        DispatchResult::Info(format!(
            "typeahead {}: Tab accepts, Esc dismisses, Up/Down select. F2/F3 load/save dictionary, F4 learn text, F5 clear, F6 settings",
            env!("CARGO_PKG_VERSION")
        ))
    }
}
