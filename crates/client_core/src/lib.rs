//! Board core: task store access, lane projection, rendering and the
//! controller that keeps the board in sync with the store.

pub mod config;
pub mod controller;
pub mod error;
pub mod projection;
pub mod render;
pub mod store;

pub use config::{load_settings, Settings};
pub use controller::{
    BoardCommand, BoardInterface, Controller, Notice, NoticeKind, Outcome, TaskDraft,
};
pub use error::{BoardError, StoreError};
pub use projection::{project, LaneView, ProjectedTask, TaskAction, ViewProjection};
pub use render::{BoardSurface, Card, RenderTarget, SurfaceOp};
pub use store::{HttpTaskStore, TaskStore};

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;
