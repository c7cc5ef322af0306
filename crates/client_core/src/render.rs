//! Turns a [`ViewProjection`] into cards on a [`RenderTarget`].
//!
//! Every render is a full replace: all three lanes are cleared before any card
//! is appended. Cards carry [`BoardCommand`] values for their buttons; the
//! surface hands those back to the controller when clicked.

use std::fmt::Write as _;

use shared::domain::{Lane, TaskId};

use crate::{
    controller::BoardCommand,
    projection::{ProjectedTask, TaskAction, ViewProjection},
};

pub const EMPTY_LANE_TEXT: &str = "No tasks here yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    pub label: &'static str,
    pub command: BoardCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub task_id: TaskId,
    pub lane: Lane,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub affordances: Vec<Affordance>,
}

/// A surface with one insertion point per lane.
pub trait RenderTarget: Send {
    fn clear_lane(&mut self, lane: Lane);
    fn set_count(&mut self, lane: Lane, count: usize);
    fn append_card(&mut self, lane: Lane, card: Card);
    fn show_empty_state(&mut self, lane: Lane);
    /// Board-wide error banner; shown once regardless of lane.
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
    /// End of one render pass. Targets that batch their calls deliver them here.
    fn flush(&mut self) {}
}

/// A single render-target call, detached from any target so it can be queued
/// or sent across threads and replayed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    ClearLane(Lane),
    SetCount(Lane, usize),
    AppendCard(Lane, Card),
    ShowEmptyState(Lane),
    ShowError(String),
    ClearError,
}

impl SurfaceOp {
    pub fn apply<T: RenderTarget + ?Sized>(self, target: &mut T) {
        match self {
            SurfaceOp::ClearLane(lane) => target.clear_lane(lane),
            SurfaceOp::SetCount(lane, count) => target.set_count(lane, count),
            SurfaceOp::AppendCard(lane, card) => target.append_card(lane, card),
            SurfaceOp::ShowEmptyState(lane) => target.show_empty_state(lane),
            SurfaceOp::ShowError(message) => target.show_error(&message),
            SurfaceOp::ClearError => target.clear_error(),
        }
    }
}

fn advance_label(from: Lane) -> &'static str {
    match from {
        Lane::Pending => "▶ Start",
        Lane::Active => "✓ Complete",
        Lane::Complete => "",
    }
}

pub fn card_for(projected: &ProjectedTask) -> Card {
    let task = &projected.task;
    let affordances = projected
        .actions
        .iter()
        .map(|action| match action {
            TaskAction::Advance { .. } => Affordance {
                label: advance_label(projected.lane),
                command: BoardCommand::Advance {
                    id: task.id.clone(),
                    from: projected.lane,
                },
            },
            TaskAction::Delete => Affordance {
                label: "✕ Delete",
                command: BoardCommand::Delete {
                    id: task.id.clone(),
                },
            },
        })
        .collect();

    Card {
        task_id: task.id.clone(),
        lane: projected.lane,
        title: task.title.clone(),
        description: task.visible_description().map(str::to_string),
        assignee: task.visible_assignee().map(str::to_string),
        affordances,
    }
}

fn clear_all<T: RenderTarget + ?Sized>(target: &mut T) {
    for lane in Lane::ALL {
        target.clear_lane(lane);
    }
}

pub fn render<T: RenderTarget + ?Sized>(projection: &ViewProjection, target: &mut T) {
    clear_all(target);
    target.clear_error();
    for lane_view in projection.lanes() {
        target.set_count(lane_view.lane, lane_view.count());
        if lane_view.is_empty() {
            target.show_empty_state(lane_view.lane);
            continue;
        }
        for projected in &lane_view.tasks {
            target.append_card(lane_view.lane, card_for(projected));
        }
    }
    target.flush();
}

/// Replaces the board with an error banner; no task data is left behind.
pub fn render_unavailable<T: RenderTarget + ?Sized>(message: &str, target: &mut T) {
    clear_all(target);
    for lane in Lane::ALL {
        target.set_count(lane, 0);
    }
    target.show_error(message);
    target.flush();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneSurface {
    pub cards: Vec<Card>,
    pub count: usize,
    pub shows_empty_state: bool,
}

/// In-memory render target. Used directly by the terminal client and as the
/// backing model of the desktop board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSurface {
    lanes: [LaneSurface; 3],
    error: Option<String>,
}

impl BoardSurface {
    pub fn lane(&self, lane: Lane) -> &LaneSurface {
        &self.lanes[lane.index()]
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn card_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.cards.len()).sum()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        for lane in Lane::ALL {
            let surface = self.lane(lane);
            let _ = writeln!(out, "{} ({})", lane.heading(), surface.count);
            if surface.shows_empty_state {
                let _ = writeln!(out, "  {EMPTY_LANE_TEXT}");
            }
            for card in &surface.cards {
                let _ = writeln!(out, "  [{}] {}", card.task_id, card.title);
                let meta: Vec<&str> = [card.description.as_deref(), card.assignee.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                if !meta.is_empty() {
                    let _ = writeln!(out, "      {}", meta.join(" · "));
                }
            }
        }
        out
    }
}

impl RenderTarget for BoardSurface {
    fn clear_lane(&mut self, lane: Lane) {
        self.lanes[lane.index()] = LaneSurface::default();
    }

    fn set_count(&mut self, lane: Lane, count: usize) {
        self.lanes[lane.index()].count = count;
    }

    fn append_card(&mut self, lane: Lane, card: Card) {
        let surface = &mut self.lanes[lane.index()];
        surface.shows_empty_state = false;
        surface.cards.push(card);
    }

    fn show_empty_state(&mut self, lane: Lane) {
        self.lanes[lane.index()].shows_empty_state = true;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
