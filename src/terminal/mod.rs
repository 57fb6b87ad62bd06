pub mod event_handler;
pub mod events;
pub mod raw;
pub mod render;
