//! Backend commands queued from UI to backend worker.

use client_core::{BoardCommand, TaskDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    AddTask(TaskDraft),
    Card(BoardCommand),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::AddTask(_) => "add_task",
            BackendCommand::Card(BoardCommand::Advance { .. }) => "advance_task",
            BackendCommand::Card(BoardCommand::Delete { .. }) => "delete_task",
        }
    }
}
