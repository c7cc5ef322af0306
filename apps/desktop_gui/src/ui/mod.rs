//! UI layer for the desktop board: app shell, lane columns and dialogs.

pub mod app;
pub mod board;

pub use app::LaneboardApp;
