//! Drives a [`RadixEngine`] on a timer, the way an animation event loop would.
//!
//! The driver owns pacing and pause checks; the engine only ever sees one
//! `step()` call at a time.

use std::time::Duration;

use radix_engine::RadixEngine;
use shared::{
    domain::{RunPhase, SortKind, StepResult, StepStatus},
    error::EngineError,
    protocol::PlaybackEvent,
};
use thiserror::Error;
use tokio::{
    sync::mpsc,
    time::{sleep, sleep_until, Instant},
};
use tracing::{debug, info, warn};

pub const DEFAULT_SORT_DELAY: Duration = Duration::from_millis(150);
pub const DEFAULT_HIGHLIGHT_DELAY: Duration = Duration::from_millis(100);

/// Bar colours while sorting, cycled by position.
pub const COLOR_PALETTE: [&str; 6] = [
    "#FFAAAA", "#AAAAFF", "#AAFFAA", "#FFAFAF", "#AFAFFF", "#AFFFAF",
];
/// Colours for the sweep that marks a finished run.
pub const COMPLETION_COLORS: [&str; 6] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent<'a> {
    pub kind: SortKind,
    pub step: usize,
    pub status: StepStatus,
    pub sequence: &'a [u64],
}

impl<'a> StepEvent<'a> {
    pub fn new(kind: SortKind, step: usize, result: &'a StepResult) -> Self {
        Self {
            kind,
            step,
            status: result.status(),
            sequence: result.sequence(),
        }
    }

    pub fn to_protocol(&self) -> PlaybackEvent {
        PlaybackEvent::Step {
            kind: self.kind,
            step: self.step,
            status: self.status,
            sequence: self.sequence.to_vec(),
        }
    }
}

/// Receives every snapshot and status change of a playback run.
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent<'_>);

    fn on_status(&mut self, _message: &str) {}

    fn on_highlight(&mut self, _index: usize, _color: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    TogglePause,
    Pause,
    Resume,
    Cancel,
    SetDelay(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    pub sort_delay: Duration,
    pub highlight_delay: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            sort_delay: DEFAULT_SORT_DELAY,
            highlight_delay: DEFAULT_HIGHLIGHT_DELAY,
        }
    }
}

impl PlaybackOptions {
    pub fn instant() -> Self {
        Self {
            sort_delay: Duration::ZERO,
            highlight_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed { steps: usize, sorted: Vec<u64> },
    Cancelled { steps: usize },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("radix engine error: {0}")]
    Engine(#[from] EngineError),
}

pub struct Playback {
    engine: RadixEngine,
    options: PlaybackOptions,
}

impl Playback {
    pub fn new(engine: RadixEngine, options: PlaybackOptions) -> Self {
        Self { engine, options }
    }

    pub fn engine(&self) -> &RadixEngine {
        &self.engine
    }

    /// Direct access for loading new input between runs.
    pub fn engine_mut(&mut self) -> &mut RadixEngine {
        &mut self.engine
    }

    pub fn options(&self) -> PlaybackOptions {
        self.options
    }

    /// Plays one run of `kind` to completion or cancellation.
    ///
    /// Commands are taken between steps. A closed command queue never stops
    /// the run; if it closes while paused the run resumes.
    pub async fn run<O>(
        &mut self,
        kind: SortKind,
        observer: &mut O,
        commands: &mut mpsc::Receiver<PlaybackCommand>,
    ) -> Result<PlaybackOutcome, PlaybackError>
    where
        O: StepObserver + ?Sized,
    {
        let mut result = self.engine.start(kind)?;
        info!(kind = %kind, len = result.sequence().len(), "playback started");
        observer.on_status(&format!("Sorting with {kind}..."));
        observer.on_step(&StepEvent::new(kind, 0, &result));

        let mut commands_open = true;
        while !result.is_completed() {
            if self.engine.phase() == RunPhase::Paused {
                match commands.recv().await {
                    Some(PlaybackCommand::Cancel) => return Ok(self.cancel(observer)),
                    Some(command) => self.apply(command, observer)?,
                    None => {
                        warn!("command queue closed while paused; resuming playback");
                        commands_open = false;
                        self.apply(PlaybackCommand::Resume, observer)?;
                    }
                }
                continue;
            }

            let deadline = Instant::now() + self.options.sort_delay;
            tokio::select! {
                biased;
                command = commands.recv(), if commands_open => {
                    match command {
                        Some(PlaybackCommand::Cancel) => return Ok(self.cancel(observer)),
                        Some(command) => self.apply(command, observer)?,
                        None => commands_open = false,
                    }
                    continue;
                }
                _ = sleep_until(deadline) => {}
            }

            result = self.engine.step()?;
            observer.on_step(&StepEvent::new(kind, self.engine.steps_taken(), &result));
        }

        let steps = self.engine.steps_taken();
        info!(kind = %kind, steps, "playback completed");
        observer.on_status(&format!("{kind} Radix Sort completed."));
        let sorted = result.into_sequence();
        self.highlight(sorted.len(), observer).await;
        Ok(PlaybackOutcome::Completed { steps, sorted })
    }

    fn apply<O>(&mut self, command: PlaybackCommand, observer: &mut O) -> Result<(), EngineError>
    where
        O: StepObserver + ?Sized,
    {
        debug!(?command, phase = %self.engine.phase(), "playback command");
        match command {
            PlaybackCommand::TogglePause => match self.engine.toggle_pause()? {
                RunPhase::Paused => observer.on_status("Sort paused."),
                _ => observer.on_status("Resuming sort..."),
            },
            PlaybackCommand::Pause => {
                if self.engine.phase() != RunPhase::Paused {
                    self.engine.pause()?;
                    observer.on_status("Sort paused.");
                }
            }
            PlaybackCommand::Resume => {
                if self.engine.phase() == RunPhase::Paused {
                    self.engine.resume()?;
                    observer.on_status("Resuming sort...");
                }
            }
            PlaybackCommand::SetDelay(delay) => self.options.sort_delay = delay,
            PlaybackCommand::Cancel => {
                self.cancel(observer);
            }
        }
        Ok(())
    }

    fn cancel<O>(&mut self, observer: &mut O) -> PlaybackOutcome
    where
        O: StepObserver + ?Sized,
    {
        let steps = self.engine.steps_taken();
        self.engine.cancel();
        info!(steps, "playback cancelled");
        observer.on_status("Sort cancelled.");
        PlaybackOutcome::Cancelled { steps }
    }

    async fn highlight<O>(&self, len: usize, observer: &mut O)
    where
        O: StepObserver + ?Sized,
    {
        for index in 0..len {
            if index > 0 && !self.options.highlight_delay.is_zero() {
                sleep(self.options.highlight_delay).await;
            }
            observer.on_highlight(index, COMPLETION_COLORS[index % COMPLETION_COLORS.len()]);
        }
    }
}

/// Steps a run with no pacing and returns every result, starting with the one
/// from `start`.
pub fn run_to_completion(
    engine: &mut RadixEngine,
    kind: SortKind,
) -> Result<Vec<StepResult>, EngineError> {
    let mut results = vec![engine.start(kind)?];
    while let Some(last) = results.last() {
        if last.is_completed() {
            break;
        }
        results.push(engine.step()?);
    }
    Ok(results)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
