//! Translation between the task store's status strings and board lanes.

use crate::domain::Lane;

pub const REMOTE_TODO: &str = "To Do";
pub const REMOTE_IN_PROGRESS: &str = "In Progress";
pub const REMOTE_DONE: &str = "Done";

/// Maps a stored status onto a lane. Matching is exact; anything outside the
/// store vocabulary (including a missing status) lands in `Lane::Pending` so
/// the task stays visible.
pub fn normalize(remote_status: Option<&str>) -> Lane {
    match remote_status {
        Some(REMOTE_IN_PROGRESS) => Lane::Active,
        Some(REMOTE_DONE) => Lane::Complete,
        _ => Lane::Pending,
    }
}

pub fn denormalize(lane: Lane) -> &'static str {
    match lane {
        Lane::Pending => REMOTE_TODO,
        Lane::Active => REMOTE_IN_PROGRESS,
        Lane::Complete => REMOTE_DONE,
    }
}

pub fn is_recognized(remote_status: Option<&str>) -> bool {
    matches!(
        remote_status,
        Some(REMOTE_TODO) | Some(REMOTE_IN_PROGRESS) | Some(REMOTE_DONE)
    )
}
