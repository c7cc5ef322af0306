use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::LaneboardApp;

#[derive(Parser, Debug)]
#[command(name = "laneboard_gui", about = "Desktop three-lane task board")]
struct Args {
    /// Task collection endpoint, e.g. http://127.0.0.1:8000/tasks
    #[arg(long)]
    tasks_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.tasks_url {
        settings.tasks_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let tasks_url = settings.tasks_url.clone();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Laneboard")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Laneboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaneboardApp::new(cmd_tx, ui_rx, tasks_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop board exited with an error: {err}"))
}
