//! Board controller: validates input, drives store mutations and re-renders
//! the whole board from a fresh fetch after each one.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::{
    domain::{Lane, TaskId, NO_DESCRIPTION, UNASSIGNED},
    protocol::NewTask,
    status_map,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    error::{BoardError, StoreError},
    projection::{project, ViewProjection},
    render::{render, render_unavailable, RenderTarget},
    store::TaskStore,
};

pub const EMPTY_TITLE_MESSAGE: &str = "Please do not enter an empty task!";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// What a card button asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoardCommand {
    Advance { id: TaskId, from: Lane },
    Delete { id: TaskId },
}

/// Raw contents of the add-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assignee: String,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Failure,
    Connectivity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The user-facing side of the board besides the lanes themselves.
#[async_trait]
pub trait BoardInterface: Send + Sync {
    /// Blocking notification; the user has to acknowledge it.
    fn notify(&self, notice: Notice);
    async fn confirm(&self, prompt: &str) -> bool;
    fn clear_inputs(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
    Unchanged,
}

struct SurfaceState<R> {
    target: R,
    rendered_seq: u64,
    projection: Option<ViewProjection>,
}

pub struct Controller<R: RenderTarget> {
    store: Arc<dyn TaskStore>,
    interface: Arc<dyn BoardInterface>,
    endpoint: String,
    issued_seq: AtomicU64,
    surface: Mutex<SurfaceState<R>>,
}

impl<R: RenderTarget> Controller<R> {
    /// `endpoint` only feeds the connectivity message shown when a fetch fails.
    pub fn new(
        store: Arc<dyn TaskStore>,
        target: R,
        interface: Arc<dyn BoardInterface>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            store,
            interface,
            endpoint: endpoint.into(),
            issued_seq: AtomicU64::new(0),
            surface: Mutex::new(SurfaceState {
                target,
                rendered_seq: 0,
                projection: None,
            }),
        }
    }

    pub async fn on_startup(&self) -> Result<(), BoardError> {
        info!(endpoint = %self.endpoint, "board starting");
        self.reconcile().await
    }

    /// Fetches the full task list and re-renders every lane from it.
    ///
    /// Overlapping calls are allowed. A response is only rendered if no call
    /// issued after it has rendered already, so the board never steps back to
    /// an older snapshot.
    pub async fn reconcile(&self) -> Result<(), BoardError> {
        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = self.store.fetch_all().await;

        let mut surface = self.surface.lock().await;
        if seq < surface.rendered_seq {
            debug!(seq, rendered = surface.rendered_seq, "dropping stale reconciliation");
            if let Err(err) = fetched {
                warn!(%err, "stale reconciliation failed; newer board already shown");
            }
            return Ok(());
        }
        surface.rendered_seq = seq;

        match fetched {
            Ok(tasks) => {
                let projection = project(tasks);
                render(&projection, &mut surface.target);
                info!(
                    seq,
                    pending = projection.lane(Lane::Pending).count(),
                    active = projection.lane(Lane::Active).count(),
                    complete = projection.lane(Lane::Complete).count(),
                    "board reconciled"
                );
                surface.projection = Some(projection);
                Ok(())
            }
            Err(err) => {
                error!(seq, %err, "failed to fetch tasks");
                let message = self.connectivity_message();
                render_unavailable(&message, &mut surface.target);
                surface.projection = None;
                drop(surface);
                self.interface
                    .notify(Notice::new(NoticeKind::Connectivity, format!("{message}\n{err}")));
                Err(err.into())
            }
        }
    }

    pub async fn on_add_task(&self, draft: TaskDraft) -> Result<Outcome, BoardError> {
        let title = draft.title.trim();
        if title.is_empty() {
            warn!("rejected task with empty title");
            self.interface
                .notify(Notice::new(NoticeKind::Validation, EMPTY_TITLE_MESSAGE));
            return Err(BoardError::EmptyTitle);
        }

        let new_task = NewTask {
            title: title.to_string(),
            description: or_placeholder(&draft.description, NO_DESCRIPTION),
            assignee: or_placeholder(&draft.assignee, UNASSIGNED),
        };
        if let Err(err) = self.store.create(&new_task).await {
            return Err(self.report_failure("Could not add the task", err));
        }

        info!(title = %new_task.title, "task created");
        self.interface.clear_inputs();
        self.refresh_after_mutation().await;
        Ok(Outcome::Applied)
    }

    pub async fn on_advance(&self, id: TaskId, current: Lane) -> Result<Outcome, BoardError> {
        let Some(next) = current.next() else {
            debug!(task_id = %id, "task already complete; nothing to advance");
            return Ok(Outcome::Unchanged);
        };

        let remote_status = status_map::denormalize(next);
        if let Err(err) = self.store.set_status(&id, remote_status).await {
            return Err(self.report_failure("Could not update the task", err));
        }

        info!(task_id = %id, status = remote_status, "task advanced");
        self.refresh_after_mutation().await;
        Ok(Outcome::Applied)
    }

    pub async fn on_delete(&self, id: TaskId) -> Result<Outcome, BoardError> {
        if !self.interface.confirm(DELETE_PROMPT).await {
            debug!(task_id = %id, "delete cancelled by user");
            return Ok(Outcome::Cancelled);
        }

        if let Err(err) = self.store.remove(&id).await {
            return Err(self.report_failure("Could not delete the task", err));
        }

        info!(task_id = %id, "task deleted");
        self.refresh_after_mutation().await;
        Ok(Outcome::Applied)
    }

    /// Routes a card button press to the matching operation.
    pub async fn dispatch(&self, command: BoardCommand) -> Result<Outcome, BoardError> {
        match command {
            BoardCommand::Advance { id, from } => self.on_advance(id, from).await,
            BoardCommand::Delete { id } => self.on_delete(id).await,
        }
    }

    /// Lane the task sat in at the last successful reconciliation.
    pub async fn lane_of(&self, id: &TaskId) -> Option<Lane> {
        let surface = self.surface.lock().await;
        surface
            .projection
            .as_ref()
            .and_then(|projection| projection.find(id))
            .map(|task| task.lane)
    }

    pub async fn with_surface<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        let surface = self.surface.lock().await;
        f(&surface.target)
    }

    pub fn connectivity_message(&self) -> String {
        format!("Backend connection failed. Is {} reachable?", self.endpoint)
    }

    async fn refresh_after_mutation(&self) {
        // A failed refresh has already been reported and rendered.
        if let Err(err) = self.reconcile().await {
            debug!(%err, "refresh after mutation failed");
        }
    }

    fn report_failure(&self, context: &str, err: StoreError) -> BoardError {
        error!(%err, status = ?err.status(), "{context}");
        self.interface
            .notify(Notice::new(NoticeKind::Failure, format!("{context}: {err}")));
        BoardError::Store(err)
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
