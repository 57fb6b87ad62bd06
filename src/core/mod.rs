//! This module constitutes the core, headless, and backend-agnostic part of typeahead.
//! It holds the document model, command dispatch, the completion engine and the
//! suggestion controller that drives the popup. Nothing here touches the terminal.

pub mod app;
pub mod atomic;
pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod document;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod prompt;
pub mod suggest;
pub mod task_queue;
pub mod word;
