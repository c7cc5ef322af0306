//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    BoardError, Controller, HttpTaskStore, Notice, NoticeKind, Outcome, Settings,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::{
    commands::BackendCommand,
    surface::{ChannelSurface, GuiInterface},
};
use crate::controller::events::UiEvent;

type BoardController = Controller<ChannelSurface>;

fn startup_failure(ui_tx: &Sender<UiEvent>, message: String) {
    tracing::error!("{message}");
    let _ = ui_tx.try_send(UiEvent::Notice(Notice::new(NoticeKind::Failure, message)));
}

/// Spawns the backend worker thread. Every command runs as its own task, so a
/// slow request never holds up the ones queued behind it.
pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                startup_failure(
                    &ui_tx,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let store = match HttpTaskStore::new(&settings.tasks_url, settings.request_timeout()) {
                Ok(store) => store,
                Err(err) => {
                    startup_failure(
                        &ui_tx,
                        format!("backend worker startup failure: {err:#}"),
                    );
                    return;
                }
            };

            let controller: Arc<BoardController> = Arc::new(Controller::new(
                Arc::new(store),
                ChannelSurface::new(ui_tx.clone()),
                Arc::new(GuiInterface::new(ui_tx.clone())),
                settings.tasks_url.clone(),
            ));
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Backend worker ready ({})",
                settings.tasks_url
            )));

            {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move {
                    if let Err(err) = controller.on_startup().await {
                        tracing::debug!(%err, "initial reconciliation failed");
                    }
                });
            }

            while let Ok(cmd) = cmd_rx.recv() {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move {
                    let name = cmd.name();
                    match run_command(&controller, cmd).await {
                        Ok(outcome) => tracing::debug!(command = name, ?outcome, "command finished"),
                        // Already surfaced to the user by the controller.
                        Err(err) => tracing::debug!(command = name, %err, "command failed"),
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

async fn run_command(
    controller: &BoardController,
    cmd: BackendCommand,
) -> Result<Outcome, BoardError> {
    match cmd {
        BackendCommand::Refresh => controller.reconcile().await.map(|()| Outcome::Applied),
        BackendCommand::AddTask(draft) => controller.on_add_task(draft).await,
        BackendCommand::Card(command) => controller.dispatch(command).await,
    }
}
