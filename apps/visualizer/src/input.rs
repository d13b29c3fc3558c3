//! Stdin command reader: maps typed keys onto playback and session commands.

use std::time::Duration;

use playback::PlaybackCommand;
use shared::domain::SortKind;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::debug;

const MIN_DELAY: Duration = Duration::from_millis(1);
const MAX_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start(SortKind),
    Generate,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    TogglePause,
    Cancel,
    Faster,
    Slower,
    Session(SessionCommand),
}

pub fn parse_input(line: &str) -> Option<InputAction> {
    let action = match line.trim().to_ascii_lowercase().as_str() {
        "p" | "pause" | "resume" => InputAction::TogglePause,
        "c" | "cancel" => InputAction::Cancel,
        "+" | "faster" => InputAction::Faster,
        "-" | "slower" => InputAction::Slower,
        "l" | "lsd" => InputAction::Session(SessionCommand::Start(SortKind::Lsd)),
        "m" | "msd" => InputAction::Session(SessionCommand::Start(SortKind::Msd)),
        "g" | "generate" => InputAction::Session(SessionCommand::Generate),
        "q" | "quit" | "exit" => InputAction::Session(SessionCommand::Quit),
        _ => return None,
    };
    Some(action)
}

/// Halves or doubles `current`, clamped to a sane animation range.
pub fn adjust_delay(current: Duration, faster: bool) -> Duration {
    let next = if faster {
        current / 2
    } else {
        current.saturating_mul(2)
    };
    next.clamp(MIN_DELAY, MAX_DELAY)
}

/// Reads stdin lines until EOF. Playback controls go to `playback_tx`,
/// everything else to `session_tx`. Quitting also cancels a running sort and
/// stops the reader.
pub fn spawn_stdin_reader(
    playback_tx: mpsc::Sender<PlaybackCommand>,
    session_tx: mpsc::Sender<SessionCommand>,
    initial_delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut delay = initial_delay;
        while let Ok(Some(line)) = lines.next_line().await {
            let Some(action) = parse_input(&line) else {
                debug!(input = %line.trim(), "ignoring unrecognised input");
                continue;
            };
            let command = match action {
                InputAction::TogglePause => PlaybackCommand::TogglePause,
                InputAction::Cancel => PlaybackCommand::Cancel,
                InputAction::Faster | InputAction::Slower => {
                    delay = adjust_delay(delay, action == InputAction::Faster);
                    PlaybackCommand::SetDelay(delay)
                }
                InputAction::Session(SessionCommand::Quit) => {
                    let _ = playback_tx.try_send(PlaybackCommand::Cancel);
                    let _ = session_tx.send(SessionCommand::Quit).await;
                    // No read may stay pending once the session ends.
                    break;
                }
                InputAction::Session(session) => {
                    if session_tx.send(session).await.is_err() {
                        break;
                    }
                    continue;
                }
            };
            if playback_tx.send(command).await.is_err() {
                break;
            }
        }
        debug!("stdin reader finished");
    })
}
