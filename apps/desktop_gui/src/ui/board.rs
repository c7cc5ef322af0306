//! Lane columns and task cards.

use client_core::{render::EMPTY_LANE_TEXT, render::LaneSurface, BoardCommand, Card};
use eframe::egui;
use shared::domain::Lane;

fn lane_accent(lane: Lane) -> egui::Color32 {
    match lane {
        Lane::Pending => egui::Color32::from_rgb(96, 125, 219),
        Lane::Active => egui::Color32::from_rgb(230, 162, 60),
        Lane::Complete => egui::Color32::from_rgb(67, 181, 129),
    }
}

/// Draws one lane and collects the commands of any buttons clicked this frame.
pub fn lane_column(
    ui: &mut egui::Ui,
    lane: Lane,
    surface: &LaneSurface,
    clicked: &mut Vec<BoardCommand>,
) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(lane.heading())
                .heading()
                .color(lane_accent(lane)),
        );
        ui.label(egui::RichText::new(surface.count.to_string()).strong());
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt(("lane", lane.index()))
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if surface.shows_empty_state {
                ui.label(egui::RichText::new(EMPTY_LANE_TEXT).weak().italics());
            }
            for card in &surface.cards {
                task_card(ui, card, clicked);
                ui.add_space(6.0);
            }
        });
}

fn task_card(ui: &mut egui::Ui, card: &Card, clicked: &mut Vec<BoardCommand>) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, lane_accent(card.lane)))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&card.title).strong());
            if let Some(description) = &card.description {
                ui.label(egui::RichText::new(description).small());
            }
            if let Some(assignee) = &card.assignee {
                ui.label(egui::RichText::new(format!("👤 {assignee}")).small().weak());
            }
            ui.horizontal(|ui| {
                for affordance in &card.affordances {
                    if ui.small_button(affordance.label).clicked() {
                        clicked.push(affordance.command.clone());
                    }
                }
            });
        });
}
