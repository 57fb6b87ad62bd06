// typeahead Configuration
// Edit this file to customize the editor, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Keybindings
    // File operations
    config.bind("^N", "new-file");
    config.bind("^O", "find-file");
    config.bind("^S", "save-file");
    config.bind("^W", "save-file-as");
    config.bind("^Q", "exit");

    // Dictionary
    config.bind("F2", "load-dictionary");
    config.bind("F3", "save-dictionary");
    config.bind("F4", "add-text-to-dictionary");
    config.bind("F5", "clear-dictionary");

    // Settings and help
    config.bind("F1", "about");
    config.bind("F6", "configure");

    // Movement
    config.bind("Right", "forward-character");
    config.bind("Left", "backward-character");
    config.bind("Down", "next-line");
    config.bind("Up", "previous-line");
    config.bind("Home", "beginning-of-line");
    config.bind("End", "end-of-line");
    config.bind("^A", "beginning-of-line");
    config.bind("^E", "end-of-line");
    config.bind("PageUp", "backward-page");
    config.bind("PageDown", "forward-page");

    // Editing
    config.bind("Enter", "insert-newline");
    config.bind("Tab", "insert-tab");
    config.bind("Backspace", "delete-previous-character");
    config.bind("Delete", "delete-next-character");

    // Completion engine
    config.set("max_suggestions", 10i64);
    config.set("tolerance_threshold", 0i64);
    config.set("tolerance", 0i64);
    config.set("similar_weight", 0.5);
    config.set("original_weight", 1.0);

    // Popup stays hidden this long after a dismissal
    config.set("cooldown_ms", 300i64);

    // Loaded at startup when present
    config.set("dictionary", "dict");
}
