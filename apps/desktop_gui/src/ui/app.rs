use client_core::{BoardCommand, NoticeKind};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Lane;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::BoardViewState;
use crate::ui::board::lane_column;

pub struct LaneboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    tasks_url: String,
    state: BoardViewState,
}

fn notice_title(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "Check your input",
        NoticeKind::Failure => "Something went wrong",
        NoticeKind::Connectivity => "Connection problem",
    }
}

impl LaneboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        tasks_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            tasks_url,
            state: BoardViewState::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, enabled: bool) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Laneboard");
                    ui.label(egui::RichText::new(&self.tasks_url).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⟳ Refresh").clicked() {
                            self.send(BackendCommand::Refresh);
                        }
                        let synced = match self.state.last_synced {
                            Some(at) => format!("Last synced {}", at.format("%H:%M:%S")),
                            None => "Not synced yet".to_string(),
                        };
                        ui.label(egui::RichText::new(synced).small().weak());
                    });
                });
            });
        });
    }

    fn show_add_form(&mut self, ctx: &egui::Context, enabled: bool) {
        egui::TopBottomPanel::top("add_task_form").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                let mut submit = false;
                ui.horizontal(|ui| {
                    let title = ui.add(
                        egui::TextEdit::singleline(&mut self.state.draft.title)
                            .hint_text("What needs doing?")
                            .desired_width(260.0),
                    );
                    if title.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.state.draft.description)
                            .hint_text("Description (optional)")
                            .desired_width(260.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.state.draft.assignee)
                            .hint_text("Assignee (optional)")
                            .desired_width(160.0),
                    );
                    if ui.button("＋ Add task").clicked() {
                        submit = true;
                    }
                });
                if submit {
                    let draft = self.state.draft.clone();
                    self.send(BackendCommand::AddTask(draft));
                }
                if !self.state.status.is_empty() {
                    ui.small(egui::RichText::new(&self.state.status).weak());
                }
            });
        });
    }

    fn show_lanes(&mut self, ctx: &egui::Context, enabled: bool) {
        let mut clicked: Vec<BoardCommand> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                if let Some(error) = self.state.surface.error() {
                    egui::Frame::group(ui.style())
                        .fill(egui::Color32::from_rgb(239, 68, 68))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(egui::RichText::new(error).color(egui::Color32::WHITE));
                        });
                    ui.add_space(8.0);
                }
                ui.columns(Lane::ALL.len(), |columns| {
                    for lane in Lane::ALL {
                        lane_column(
                            &mut columns[lane.index()],
                            lane,
                            self.state.surface.lane(lane),
                            &mut clicked,
                        );
                    }
                });
            });
        });
        for command in clicked {
            self.send(BackendCommand::Card(command));
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.state.current_confirm() {
            let prompt = pending.prompt.clone();
            let mut answer = None;
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(prompt);
                    ui.horizontal(|ui| {
                        if ui.button("Delete").clicked() {
                            answer = Some(true);
                        }
                        if ui.button("Cancel").clicked() {
                            answer = Some(false);
                        }
                    });
                });
            if let Some(confirmed) = answer {
                self.state.resolve_confirm(confirmed);
            }
            return;
        }

        if let Some(notice) = self.state.current_notice() {
            let title = notice_title(notice.kind);
            let message = notice.message.clone();
            let mut acknowledged = false;
            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            if acknowledged {
                self.state.acknowledge_notice();
            }
        }
    }
}

impl eframe::App for LaneboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let enabled = !self.state.is_blocked();
        self.show_top_bar(ctx, enabled);
        self.show_add_form(ctx, enabled);
        self.show_lanes(ctx, enabled);
        self.show_dialogs(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
