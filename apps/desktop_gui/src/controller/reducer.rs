//! UI-thread board state and how backend events change it.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use client_core::{BoardSurface, Notice, SurfaceOp, TaskDraft};
use tokio::sync::oneshot;

use crate::controller::events::UiEvent;

pub struct PendingConfirm {
    pub prompt: String,
    reply: oneshot::Sender<bool>,
}

impl PendingConfirm {
    pub fn answer(self, confirmed: bool) {
        // The backend may have given up waiting; nothing to do then.
        let _ = self.reply.send(confirmed);
    }
}

#[derive(Default)]
pub struct BoardViewState {
    pub surface: BoardSurface,
    pub draft: TaskDraft,
    pub status: String,
    pub last_synced: Option<DateTime<Local>>,
    notices: VecDeque<Notice>,
    confirms: VecDeque<PendingConfirm>,
}

impl BoardViewState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Render(ops) => {
                // The renderer only clears the banner when it has fresh tasks.
                if ops.contains(&SurfaceOp::ClearError) {
                    self.last_synced = Some(Local::now());
                }
                for op in ops {
                    op.apply(&mut self.surface);
                }
            }
            UiEvent::Notice(notice) => {
                tracing::debug!(kind = ?notice.kind, "queued user notice");
                self.notices.push_back(notice);
            }
            UiEvent::ConfirmRequested { prompt, reply } => {
                self.confirms.push_back(PendingConfirm { prompt, reply });
            }
            UiEvent::ClearInputs => self.draft = TaskDraft::default(),
        }
    }

    /// True while a notice or confirmation is waiting for the user.
    pub fn is_blocked(&self) -> bool {
        !self.notices.is_empty() || !self.confirms.is_empty()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn acknowledge_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn current_confirm(&self) -> Option<&PendingConfirm> {
        self.confirms.front()
    }

    pub fn resolve_confirm(&mut self, confirmed: bool) {
        if let Some(pending) = self.confirms.pop_front() {
            pending.answer(confirmed);
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{NoticeKind, TaskDraft};
    use shared::domain::Lane;

    use super::*;

    #[test]
    fn surface_ops_update_board_and_sync_time() {
        let mut state = BoardViewState::default();
        state.apply(UiEvent::Render(vec![SurfaceOp::ShowError("offline".into())]));
        assert_eq!(state.surface.error(), Some("offline"));
        assert!(state.last_synced.is_none());

        state.apply(UiEvent::Render(vec![
            SurfaceOp::ClearError,
            SurfaceOp::SetCount(Lane::Pending, 2),
        ]));
        assert_eq!(state.surface.error(), None);
        assert_eq!(state.surface.lane(Lane::Pending).count, 2);
        assert!(state.last_synced.is_some());
    }

    #[test]
    fn clear_inputs_resets_the_form() {
        let mut state = BoardViewState {
            draft: TaskDraft {
                title: "Write spec".into(),
                description: "draft".into(),
                assignee: "sam".into(),
            },
            ..BoardViewState::default()
        };
        state.apply(UiEvent::ClearInputs);
        assert_eq!(state.draft, TaskDraft::default());
    }

    #[test]
    fn notices_block_until_acknowledged_in_order() {
        let mut state = BoardViewState::default();
        state.apply(UiEvent::Notice(Notice::new(NoticeKind::Validation, "first")));
        state.apply(UiEvent::Notice(Notice::new(NoticeKind::Failure, "second")));

        assert!(state.is_blocked());
        assert_eq!(state.current_notice().map(|n| n.message.as_str()), Some("first"));
        state.acknowledge_notice();
        assert_eq!(state.current_notice().map(|n| n.message.as_str()), Some("second"));
        state.acknowledge_notice();
        assert!(!state.is_blocked());
    }

    #[test]
    fn resolving_confirm_replies_to_backend() {
        let mut state = BoardViewState::default();
        let (reply, mut answer) = oneshot::channel();
        state.apply(UiEvent::ConfirmRequested {
            prompt: "Sure?".into(),
            reply,
        });

        assert!(state.is_blocked());
        assert_eq!(state.current_confirm().map(|c| c.prompt.as_str()), Some("Sure?"));
        state.resolve_confirm(false);
        assert_eq!(answer.try_recv().ok(), Some(false));
        assert!(!state.is_blocked());
    }
}
