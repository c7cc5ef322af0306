//! Terminal side of the board: notices go to stderr, confirmations read stdin.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use client_core::{BoardInterface, Notice, NoticeKind};
use tracing::{debug, warn};

pub struct TerminalInterface {
    assume_yes: bool,
}

impl TerminalInterface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Validation => "invalid",
        NoticeKind::Failure => "error",
        NoticeKind::Connectivity => "offline",
    };
    format!("[{tag}] {}", notice.message.replace('\n', " | "))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl BoardInterface for TerminalInterface {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice_line(&notice));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stderr = io::stderr();
            write!(stderr, "{prompt} [y/N] ")?;
            stderr.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(err)) => {
                warn!(%err, "could not read confirmation; treating as no");
                false
            }
            Err(err) => {
                warn!(%err, "confirmation prompt task failed; treating as no");
                false
            }
        }
    }

    fn clear_inputs(&self) {
        debug!("command-line input consumed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_explicit_yes() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn notice_lines_are_single_line_and_tagged() {
        let line = notice_line(&Notice::new(
            NoticeKind::Connectivity,
            "Backend connection failed.\ncould not reach the task store",
        ));
        assert_eq!(
            line,
            "[offline] Backend connection failed. | could not reach the task store"
        );
    }
}
