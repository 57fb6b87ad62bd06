//! Command Pattern for editor actions
//!
//! Every action reachable from a key binding implements [`Command`] and is
//! registered by name, so bindings and the dispatcher only deal in names.

use crate::core::app::EditorApp;
use crate::core::dispatcher::DispatchResult;

/// An editor action bound to a name
pub trait Command: Send + Sync + CloneCommand {
    fn execute(&self, app: &mut EditorApp) -> DispatchResult;
}

/// Helper trait for cloning boxed commands
pub trait CloneCommand {
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}
