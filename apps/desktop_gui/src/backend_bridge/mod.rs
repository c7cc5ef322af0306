//! Bridge between the UI thread and the backend worker that owns the board controller.

pub mod commands;
pub mod runtime;
pub mod surface;
