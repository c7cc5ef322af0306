use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, BoardSurface, Controller, HttpTaskStore, Outcome, TaskDraft,
};
use shared::domain::TaskId;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalInterface;

#[derive(Parser, Debug)]
#[command(name = "laneboard", about = "Three-lane task board backed by a remote task store")]
struct Cli {
    /// Task collection endpoint, e.g. http://127.0.0.1:8000/tasks
    #[arg(long, global = true)]
    tasks_url: Option<String>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board (default)
    #[command(alias = "refresh")]
    Board,
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        assignee: String,
    },
    /// Move a task one lane forward
    Advance { id: String },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.tasks_url.clone() {
        settings.tasks_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = HttpTaskStore::new(&settings.tasks_url, settings.request_timeout())
        .context("failed to set up task store client")?;
    let assume_yes = matches!(cli.command, Some(Command::Delete { yes: true, .. }));
    let controller = Controller::new(
        Arc::new(store),
        BoardSurface::default(),
        Arc::new(TerminalInterface::new(assume_yes)),
        settings.tasks_url.clone(),
    );

    let result = match cli.command.unwrap_or(Command::Board) {
        Command::Board => controller.on_startup().await.map(|()| Outcome::Applied),
        Command::Add {
            title,
            description,
            assignee,
        } => {
            controller
                .on_add_task(TaskDraft {
                    title,
                    description,
                    assignee,
                })
                .await
        }
        Command::Advance { id } => {
            let id = TaskId(id);
            if controller.reconcile().await.is_err() {
                print!("{}", controller.with_surface(BoardSurface::to_text).await);
                return Ok(ExitCode::FAILURE);
            }
            let Some(lane) = controller.lane_of(&id).await else {
                eprintln!("[invalid] no task with id {id} on the board");
                return Ok(ExitCode::FAILURE);
            };
            controller.on_advance(id, lane).await
        }
        Command::Delete { id, .. } => controller.on_delete(TaskId(id)).await,
    };

    let board = controller.with_surface(BoardSurface::to_text).await;
    print!("{board}");

    match result {
        Ok(Outcome::Cancelled) => {
            println!("Cancelled.");
            Ok(ExitCode::SUCCESS)
        }
        Ok(_) => Ok(ExitCode::SUCCESS),
        // Already reported to the user by the controller.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
