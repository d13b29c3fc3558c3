use std::fmt;

use serde::{Deserialize, Serialize};

/// Which radix sort variant a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    Lsd,
    Msd,
}

impl SortKind {
    pub fn label(self) -> &'static str {
        match self {
            SortKind::Lsd => "LSD",
            SortKind::Msd => "MSD",
        }
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl RunPhase {
    /// A run exists and has not finished yet.
    pub fn is_active(self) -> bool {
        matches!(self, RunPhase::Running | RunPhase::Paused)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::Paused => "paused",
            RunPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Progressed,
    Completed,
}

/// Outcome of one unit of sorting work, carrying an owned snapshot of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Progressed(Vec<u64>),
    Completed(Vec<u64>),
}

impl StepResult {
    pub fn status(&self) -> StepStatus {
        match self {
            StepResult::Progressed(_) => StepStatus::Progressed,
            StepResult::Completed(_) => StepStatus::Completed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepResult::Completed(_))
    }

    pub fn sequence(&self) -> &[u64] {
        match self {
            StepResult::Progressed(seq) | StepResult::Completed(seq) => seq,
        }
    }

    pub fn into_sequence(self) -> Vec<u64> {
        match self {
            StepResult::Progressed(seq) | StepResult::Completed(seq) => seq,
        }
    }
}
