//! Terminal input: stdin lines and the screen commands they stand for.

use memoria_core::error::EnvironmentError;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// What a line typed at the chat screen asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Leave the screen
    Quit,
    /// Put suggested prompt N (zero-based) into the draft
    Select(usize),
    /// Send whatever is in the draft
    SendDraft,
    /// Replace the draft with this text and send it
    Say(String),
}

pub fn parse_line(line: &str) -> LineCommand {
    let line = line.trim();
    if line.is_empty() {
        return LineCommand::SendDraft;
    }

    if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
        return LineCommand::Quit;
    }

    if let Some(n) = line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
        if n >= 1 {
            return LineCommand::Select(n - 1);
        }
    }

    LineCommand::Say(line.to_string())
}

/// Forward stdin lines until EOF. A read failure is sent once, then the
/// reader stops.
pub fn spawn_stdin_reader() -> mpsc::Receiver<Result<String, EnvironmentError>> {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(Ok(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF (Ctrl+D)
                Err(e) => {
                    let _ = tx.send(Err(EnvironmentError::Io(e))).await;
                    break;
                }
            }
        }
    });

    rx
}
