//! Line-oriented command input.
//!
//! Stands in for the page's form: each stdin line is one user action.
//! Commands are handled one at a time, independently of the poll loop.
//!
//! | Command                              | Action                    |
//! |--------------------------------------|---------------------------|
//! | `details <email> <phone> <conf>`     | submit contact details    |
//! | `email <address>`                    | register an alert e-mail  |
//! | `view`                               | print the current view    |
//! | `quit` / `exit`                      | shut down                 |

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::display::TerminalView;
use crate::monitor::{Monitor, ViewSink};

pub const USAGE: &str = "commands: details <email> <phone> <confidence> | email <address> | view | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Missing arguments are kept as empty strings so validation reports them.
    Details {
        email: String,
        phone: String,
        confidence: String,
    },
    Email(String),
    View,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command {0:?}")]
    Unknown(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let mut arg = || words.next().unwrap_or_default().to_string();

    let command = match verb.to_ascii_lowercase().as_str() {
        "details" => Command::Details {
            email: arg(),
            phone: arg(),
            confidence: arg(),
        },
        "email" => Command::Email(arg()),
        "view" => Command::View,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };

    Ok(Some(command))
}

/// Read commands from `reader` until EOF, `quit`, or cancellation.
///
/// `quit` cancels `cancel` so the rest of the process shuts down too. EOF
/// only ends input; polling carries on.
pub async fn run<R>(
    reader: R,
    monitor: Arc<Monitor>,
    view: Arc<TerminalView>,
    cancel: CancellationToken,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("Command input closed");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read command input");
                break;
            }
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Details {
                email,
                phone,
                confidence,
            })) => {
                // Outcome is already surfaced through the view sink.
                let _ = monitor.submit_details(&email, &phone, &confidence).await;
            }
            Ok(Some(Command::Email(email))) => {
                let _ = monitor.register_email(&email).await;
            }
            Ok(Some(Command::View)) => view.print(&monitor.current_view().await),
            Ok(Some(Command::Quit)) => {
                tracing::info!("Quit requested");
                cancel.cancel();
                break;
            }
            Err(e) => view.alert(&format!("{e}. {USAGE}")),
        }
    }
}
