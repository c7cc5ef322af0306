//! Derives the per-lane board view from a fetched task list.

use shared::{
    domain::{Lane, Task, TaskId},
    status_map,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Advance { to: Lane },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedTask {
    pub task: Task,
    pub lane: Lane,
    pub actions: Vec<TaskAction>,
}

impl ProjectedTask {
    pub fn id(&self) -> &TaskId {
        &self.task.id
    }

    pub fn advance_target(&self) -> Option<Lane> {
        self.actions.iter().find_map(|action| match action {
            TaskAction::Advance { to } => Some(*to),
            TaskAction::Delete => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneView {
    pub lane: Lane,
    pub tasks: Vec<ProjectedTask>,
}

impl LaneView {
    fn new(lane: Lane) -> Self {
        Self {
            lane,
            tasks: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn ids(&self) -> Vec<&TaskId> {
        self.tasks.iter().map(ProjectedTask::id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProjection {
    lanes: [LaneView; 3],
}

impl ViewProjection {
    pub fn lane(&self, lane: Lane) -> &LaneView {
        &self.lanes[lane.index()]
    }

    pub fn lanes(&self) -> impl Iterator<Item = &LaneView> {
        self.lanes.iter()
    }

    pub fn total(&self) -> usize {
        self.lanes.iter().map(LaneView::count).sum()
    }

    pub fn find(&self, id: &TaskId) -> Option<&ProjectedTask> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.tasks.iter())
            .find(|task| task.id() == id)
    }
}

pub fn actions_for(lane: Lane) -> Vec<TaskAction> {
    let mut actions = Vec::with_capacity(2);
    if let Some(to) = lane.next() {
        actions.push(TaskAction::Advance { to });
    }
    actions.push(TaskAction::Delete);
    actions
}

/// Groups tasks into lanes, keeping fetch order inside each lane.
pub fn project(tasks: Vec<Task>) -> ViewProjection {
    let mut lanes = Lane::ALL.map(LaneView::new);
    for task in tasks {
        let status = task.status.as_deref();
        if !status_map::is_recognized(status) {
            warn!(task_id = %task.id, ?status, "unknown task status, showing under To Do");
        }
        let lane = status_map::normalize(status);
        lanes[lane.index()].tasks.push(ProjectedTask {
            actions: actions_for(lane),
            lane,
            task,
        });
    }
    ViewProjection { lanes }
}
