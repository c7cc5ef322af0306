//! Backend-side stand-ins for the board and the user: every call is forwarded
//! to the UI thread as a [`UiEvent`].

use async_trait::async_trait;
use client_core::{BoardInterface, Card, Notice, RenderTarget, SurfaceOp};
use crossbeam_channel::Sender;
use shared::domain::Lane;
use tokio::sync::oneshot;
use tracing::warn;

use crate::controller::events::UiEvent;

/// Waits for room in the queue; the UI thread drains it every frame and never
/// waits on the backend. Fails only once the UI has gone away.
fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.send(event) {
        Ok(()) => true,
        Err(err) => {
            warn!(event = ?err.into_inner(), "ui closed; dropping backend->ui event");
            false
        }
    }
}

/// Collects one render pass and hands it to the UI as a single event, so the
/// UI never shows half of a full replace.
pub struct ChannelSurface {
    ui_tx: Sender<UiEvent>,
    pending: Vec<SurfaceOp>,
}

impl ChannelSurface {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self {
            ui_tx,
            pending: Vec::new(),
        }
    }
}

impl RenderTarget for ChannelSurface {
    fn clear_lane(&mut self, lane: Lane) {
        self.pending.push(SurfaceOp::ClearLane(lane));
    }

    fn set_count(&mut self, lane: Lane, count: usize) {
        self.pending.push(SurfaceOp::SetCount(lane, count));
    }

    fn append_card(&mut self, lane: Lane, card: Card) {
        self.pending.push(SurfaceOp::AppendCard(lane, card));
    }

    fn show_empty_state(&mut self, lane: Lane) {
        self.pending.push(SurfaceOp::ShowEmptyState(lane));
    }

    fn show_error(&mut self, message: &str) {
        self.pending.push(SurfaceOp::ShowError(message.to_string()));
    }

    fn clear_error(&mut self) {
        self.pending.push(SurfaceOp::ClearError);
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let ops = std::mem::take(&mut self.pending);
        forward(&self.ui_tx, UiEvent::Render(ops));
    }
}

pub struct GuiInterface {
    ui_tx: Sender<UiEvent>,
}

impl GuiInterface {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

#[async_trait]
impl BoardInterface for GuiInterface {
    fn notify(&self, notice: Notice) {
        forward(&self.ui_tx, UiEvent::Notice(notice));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let event = UiEvent::ConfirmRequested {
            prompt: prompt.to_string(),
            reply,
        };
        if !forward(&self.ui_tx, event) {
            return false;
        }
        // A dialog closed without an answer counts as "no".
        answer.await.unwrap_or(false)
    }

    fn clear_inputs(&self) {
        forward(&self.ui_tx, UiEvent::ClearInputs);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use client_core::{
        project,
        render::{render, render_unavailable},
        BoardSurface, NoticeKind,
    };
    use crossbeam_channel::bounded;
    use shared::domain::{Task, TaskId};

    use super::*;

    fn replay(events: impl IntoIterator<Item = UiEvent>, board: &mut BoardSurface) -> usize {
        let mut passes = 0;
        for event in events {
            match event {
                UiEvent::Render(ops) => {
                    passes += 1;
                    for op in ops {
                        op.apply(board);
                    }
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        passes
    }

    fn pending_tasks(count: i64) -> Vec<Task> {
        (1..=count)
            .map(|id| Task {
                id: TaskId::from(id),
                title: format!("task {id}"),
                description: None,
                assignee: None,
                status: Some("To Do".to_string()),
            })
            .collect()
    }

    #[test]
    fn render_pass_is_sent_once_on_flush() {
        let (tx, rx) = bounded(8);
        let mut surface = ChannelSurface::new(tx);
        surface.clear_lane(Lane::Active);
        surface.set_count(Lane::Active, 0);
        surface.show_empty_state(Lane::Active);
        assert!(rx.try_recv().is_err());

        surface.flush();
        match rx.try_recv() {
            Ok(UiEvent::Render(ops)) => assert_eq!(
                ops,
                vec![
                    SurfaceOp::ClearLane(Lane::Active),
                    SurfaceOp::SetCount(Lane::Active, 0),
                    SurfaceOp::ShowEmptyState(Lane::Active),
                ]
            ),
            other => panic!("unexpected event: {other:?}"),
        }
        surface.flush();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn board_larger_than_the_queue_arrives_whole() {
        let (tx, rx) = bounded(2048);
        let mut surface = ChannelSurface::new(tx);
        let projection = project(pending_tasks(2100));
        render(&projection, &mut surface);
        render(&projection, &mut surface);
        drop(surface);

        let mut board = BoardSurface::default();
        assert_eq!(replay(rx.try_iter(), &mut board), 2);
        assert_eq!(board.card_count(), 2100);
        assert_eq!(board.lane(Lane::Pending).count, 2100);
        assert_eq!(board.lane(Lane::Pending).cards.len(), 2100);
        assert_eq!(board.error(), None);
    }

    #[test]
    fn unavailable_board_replaces_cards_in_one_event() {
        let (tx, rx) = bounded(4);
        let mut surface = ChannelSurface::new(tx);
        render(&project(pending_tasks(3)), &mut surface);
        render_unavailable("Backend connection failed", &mut surface);

        let mut board = BoardSurface::default();
        assert_eq!(replay(rx.try_iter(), &mut board), 2);
        assert_eq!(board.card_count(), 0);
        assert_eq!(board.lane(Lane::Pending).count, 0);
        assert_eq!(board.error(), Some("Backend connection failed"));
    }

    #[tokio::test]
    async fn confirm_waits_for_ui_answer() {
        let (tx, rx) = bounded(1);
        let ui = thread::spawn(move || match rx.recv() {
            Ok(UiEvent::ConfirmRequested { prompt, reply }) => {
                let _ = reply.send(true);
                prompt
            }
            other => panic!("unexpected event: {other:?}"),
        });

        let interface = GuiInterface::new(tx);
        assert!(interface.confirm("Delete it?").await);
        assert_eq!(ui.join().expect("ui thread"), "Delete it?");
    }

    #[tokio::test]
    async fn dismissed_dialog_counts_as_no() {
        let (tx, rx) = bounded(1);
        let ui = thread::spawn(move || {
            // Dropping the reply sender without answering.
            let _ = rx.recv();
        });

        let interface = GuiInterface::new(tx);
        assert!(!interface.confirm("Delete it?").await);
        ui.join().expect("ui thread");
    }

    #[tokio::test]
    async fn confirm_without_ui_is_no() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let interface = GuiInterface::new(tx);
        assert!(!interface.confirm("Delete it?").await);
    }

    #[test]
    fn notices_are_forwarded() {
        let (tx, rx) = bounded(1);
        GuiInterface::new(tx).notify(Notice::new(NoticeKind::Validation, "empty"));
        match rx.try_recv() {
            Ok(UiEvent::Notice(notice)) => assert_eq!(notice.kind, NoticeKind::Validation),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
