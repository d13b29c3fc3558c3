use shared::{
    domain::{RunPhase, SortKind, StepResult},
    error::EngineError,
};
use tracing::{debug, trace};

use crate::{digits::max_digit_length, lsd::counting_sort_pass, msd::MsdCursor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Fail `start` on empty input instead of completing immediately.
    pub reject_empty: bool,
}

/// Where a run will resume on its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPosition {
    Lsd {
        current_exp: u32,
    },
    Msd {
        pending_frames: usize,
        resolved: usize,
    },
}

#[derive(Debug, Clone)]
enum Cursor {
    Lsd { current_exp: u32 },
    Msd(MsdCursor),
}

impl Cursor {
    fn for_kind(kind: SortKind, len: usize, digits: u32) -> Self {
        match kind {
            SortKind::Lsd => Cursor::Lsd { current_exp: 0 },
            SortKind::Msd => Cursor::Msd(MsdCursor::new(len, digits)),
        }
    }

    fn position(&self) -> CursorPosition {
        match self {
            Cursor::Lsd { current_exp } => CursorPosition::Lsd {
                current_exp: *current_exp,
            },
            Cursor::Msd(cursor) => CursorPosition::Msd {
                pending_frames: cursor.pending_frames(),
                resolved: cursor.resolved(),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Run {
    kind: SortKind,
    cursor: Cursor,
    paused: bool,
    completed: bool,
    steps: usize,
}

/// Resumable radix sort over an owned sequence.
///
/// The engine keeps the input it was given untouched; every `start` sorts a
/// fresh copy, so a cancelled run can be replayed step for step.
#[derive(Debug, Clone)]
pub struct RadixEngine {
    input: Vec<u64>,
    sequence: Vec<u64>,
    digits: u32,
    options: EngineOptions,
    run: Option<Run>,
}

impl RadixEngine {
    pub fn new(numbers: Vec<u64>) -> Self {
        Self::with_options(numbers, EngineOptions::default())
    }

    pub fn with_options(numbers: Vec<u64>, options: EngineOptions) -> Self {
        let digits = max_digit_length(&numbers);
        Self {
            sequence: numbers.clone(),
            input: numbers,
            digits,
            options,
            run: None,
        }
    }

    pub fn phase(&self) -> RunPhase {
        match &self.run {
            None => RunPhase::Idle,
            Some(run) if run.completed => RunPhase::Completed,
            Some(run) if run.paused => RunPhase::Paused,
            Some(_) => RunPhase::Running,
        }
    }

    pub fn kind(&self) -> Option<SortKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Current ordering of the working sequence.
    pub fn snapshot(&self) -> &[u64] {
        &self.sequence
    }

    pub fn input(&self) -> &[u64] {
        &self.input
    }

    /// Units of work performed by the current run; paused steps do not count.
    pub fn steps_taken(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.steps)
    }

    pub fn cursor_position(&self) -> Option<CursorPosition> {
        self.run.as_ref().map(|run| run.cursor.position())
    }

    /// Replaces the input. Only allowed while no run is active.
    pub fn load(&mut self, numbers: Vec<u64>) -> Result<(), EngineError> {
        let phase = self.phase();
        if phase.is_active() {
            return Err(EngineError::invalid_state("load", phase));
        }
        self.digits = max_digit_length(&numbers);
        self.sequence = numbers.clone();
        self.input = numbers;
        self.run = None;
        Ok(())
    }

    /// Begins a run of `kind` and returns the untouched starting snapshot.
    ///
    /// Empty input completes immediately with an empty sequence unless
    /// [`EngineOptions::reject_empty`] is set.
    pub fn start(&mut self, kind: SortKind) -> Result<StepResult, EngineError> {
        let phase = self.phase();
        if phase.is_active() {
            return Err(EngineError::invalid_state("start", phase));
        }
        if self.input.is_empty() && self.options.reject_empty {
            return Err(EngineError::precondition(
                "cannot start a radix sort on an empty sequence",
            ));
        }

        self.sequence = self.input.clone();
        let completed = self.sequence.is_empty();
        self.run = Some(Run {
            kind,
            cursor: Cursor::for_kind(kind, self.sequence.len(), self.digits),
            paused: false,
            completed,
            steps: 0,
        });
        debug!(
            kind = %kind,
            len = self.sequence.len(),
            digits = self.digits,
            "radix run started"
        );

        if completed {
            Ok(StepResult::Completed(Vec::new()))
        } else {
            Ok(StepResult::Progressed(self.sequence.clone()))
        }
    }

    /// Performs one unit of work: a full counting-sort pass for LSD, or the walk
    /// to the next resolved bucket for MSD. A paused run returns its last
    /// snapshot without advancing.
    pub fn step(&mut self) -> Result<StepResult, EngineError> {
        let phase = self.phase();
        let Some(run) = self.run.as_mut() else {
            return Err(EngineError::invalid_state("step", phase));
        };
        if run.completed {
            return Err(EngineError::invalid_state("step", phase));
        }
        if run.paused {
            trace!(kind = %run.kind, "step skipped while paused");
            return Ok(StepResult::Progressed(self.sequence.clone()));
        }

        let done = match &mut run.cursor {
            Cursor::Lsd { current_exp } => {
                if *current_exp < self.digits {
                    counting_sort_pass(&mut self.sequence, *current_exp);
                    *current_exp += 1;
                }
                *current_exp >= self.digits
            }
            Cursor::Msd(cursor) => {
                cursor.advance(&mut self.sequence);
                cursor.is_exhausted()
            }
        };
        run.steps += 1;
        trace!(kind = %run.kind, step = run.steps, "radix step");

        if done {
            run.completed = true;
            debug!(kind = %run.kind, steps = run.steps, "radix run completed");
            Ok(StepResult::Completed(self.sequence.clone()))
        } else {
            Ok(StepResult::Progressed(self.sequence.clone()))
        }
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.active_run_mut("pause")?.paused = true;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), EngineError> {
        self.active_run_mut("resume")?.paused = false;
        Ok(())
    }

    /// Flips the paused flag and reports the resulting phase.
    pub fn toggle_pause(&mut self) -> Result<RunPhase, EngineError> {
        let run = self.active_run_mut("toggle pause")?;
        run.paused = !run.paused;
        Ok(self.phase())
    }

    /// Drops any run state and restores the input ordering.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            debug!(kind = %run.kind, steps = run.steps, "radix run cancelled");
        }
        self.sequence = self.input.clone();
    }

    fn active_run_mut(&mut self, operation: &'static str) -> Result<&mut Run, EngineError> {
        let phase = self.phase();
        match self.run.as_mut() {
            Some(run) if !run.completed => Ok(run),
            _ => Err(EngineError::invalid_state(operation, phase)),
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
