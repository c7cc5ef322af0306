//! Events flowing from the backend worker to the UI thread.

use client_core::{Notice, SurfaceOp};
use tokio::sync::oneshot;

pub enum UiEvent {
    Info(String),
    /// One complete render pass to replay on the UI-side board.
    Render(Vec<SurfaceOp>),
    Notice(Notice),
    ConfirmRequested {
        prompt: String,
        reply: oneshot::Sender<bool>,
    },
    ClearInputs,
}

impl std::fmt::Debug for UiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiEvent::Info(message) => f.debug_tuple("Info").field(message).finish(),
            UiEvent::Render(ops) => f.debug_tuple("Render").field(&ops.len()).finish(),
            UiEvent::Notice(notice) => f.debug_tuple("Notice").field(notice).finish(),
            UiEvent::ConfirmRequested { prompt, .. } => f
                .debug_struct("ConfirmRequested")
                .field("prompt", prompt)
                .finish_non_exhaustive(),
            UiEvent::ClearInputs => f.write_str("ClearInputs"),
        }
    }
}
