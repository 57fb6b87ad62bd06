//! Command implementations
//!
//! - **movement**: Caret navigation (forward-character, next-line, etc.)
//! - **editing**: Basic text editing (insert-newline, delete-char, etc.)
//! - **file**: Document operations (new-file, find-file, save-file, etc.)
//! - **dictionary**: Completion dictionary management
//! - **control**: Settings, about and exit
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait.

/// Application control
pub mod control;
/// Dictionary management
pub mod dictionary;
/// Basic editing (insert, delete)
pub mod editing;
/// File operations
pub mod file;
/// Caret movement commands
pub mod movement;

/// Register all commands in the application
pub fn register_all(app: &mut crate::core::app::EditorApp) {
    use crate::core::command::Command;
    use std::collections::HashMap;

    use self::control::*;
    use self::dictionary::*;
    use self::editing::*;
    use self::file::*;
    use self::movement::*;

    let mut registry: HashMap<String, Box<dyn Command>> = HashMap::new();

    // Movement commands
    registry.insert("forward-character".to_string(), Box::new(ForwardChar));
    registry.insert("backward-character".to_string(), Box::new(BackwardChar));
    registry.insert("next-line".to_string(), Box::new(NextLine));
    registry.insert("previous-line".to_string(), Box::new(PreviousLine));
    registry.insert("beginning-of-line".to_string(), Box::new(BeginningOfLine));
    registry.insert("end-of-line".to_string(), Box::new(EndOfLine));
    registry.insert("forward-page".to_string(), Box::new(ForwardPage));
    registry.insert("backward-page".to_string(), Box::new(BackwardPage));

    // Editing commands
    registry.insert("insert-newline".to_string(), Box::new(InsertNewline));
    registry.insert("insert-tab".to_string(), Box::new(InsertTab));
    registry.insert(
        "delete-previous-character".to_string(),
        Box::new(DeletePreviousChar),
    );
    registry.insert(
        "delete-next-character".to_string(),
        Box::new(DeleteNextChar),
    );

    // File commands
    registry.insert("new-file".to_string(), Box::new(NewFile));
    registry.insert("find-file".to_string(), Box::new(FindFile));
    registry.insert("save-file".to_string(), Box::new(SaveFile));
    registry.insert("save-file-as".to_string(), Box::new(SaveFileAs));

    // Dictionary commands
    registry.insert("load-dictionary".to_string(), Box::new(LoadDictionary));
    registry.insert("save-dictionary".to_string(), Box::new(SaveDictionary));
    registry.insert(
        "add-text-to-dictionary".to_string(),
        Box::new(AddTextToDictionary),
    );
    registry.insert("clear-dictionary".to_string(), Box::new(ClearDictionary));

    // Control commands
    registry.insert("configure".to_string(), Box::new(Configure));
    registry.insert("about".to_string(), Box::new(About));
    registry.insert("exit".to_string(), Box::new(Exit));

    app.command_registry = registry;
}
