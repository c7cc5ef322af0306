use std::fmt;

use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description";
pub const UNASSIGNED: &str = "Unassigned";

/// Store-assigned task identifier. The store may hand out numbers or strings;
/// both are kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireTaskId")]
pub struct TaskId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTaskId {
    Number(i64),
    Text(String),
}

impl From<WireTaskId> for TaskId {
    fn from(value: WireTaskId) -> Self {
        match value {
            WireTaskId::Number(n) => Self(n.to_string()),
            WireTaskId::Text(s) => Self(s),
        }
    }
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Pending,
    Active,
    Complete,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Pending, Lane::Active, Lane::Complete];

    /// Forward transition; there is no way back out of a lane.
    pub fn next(self) -> Option<Lane> {
        match self {
            Lane::Pending => Some(Lane::Active),
            Lane::Active => Some(Lane::Complete),
            Lane::Complete => None,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Lane::Pending => "To Do",
            Lane::Active => "In Progress",
            Lane::Complete => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Lane::Pending => 0,
            Lane::Active => 1,
            Lane::Complete => 2,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Task {
    /// Description worth showing as metadata, if any.
    pub fn visible_description(&self) -> Option<&str> {
        visible_metadata(self.description.as_deref(), NO_DESCRIPTION)
    }

    /// Assignee worth showing as metadata, if any.
    pub fn visible_assignee(&self) -> Option<&str> {
        visible_metadata(self.assignee.as_deref(), UNASSIGNED)
    }
}

fn visible_metadata<'a>(value: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != placeholder)
}
