//! Bridge between the UI thread and the background generation worker.

pub mod commands;
pub mod runtime;
