use serde::{Deserialize, Serialize};

use crate::domain::Task;

/// Body of `POST /tasks`. The store assigns the id and the initial status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee: String,
}

/// Query string of `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

pub type TaskList = Vec<Task>;
