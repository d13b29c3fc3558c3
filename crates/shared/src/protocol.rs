use serde::{Deserialize, Serialize};

use crate::{
    domain::{SortKind, StepStatus},
    error::ErrorReport,
};

/// Line-oriented events a host emits while animating a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlaybackEvent {
    Step {
        kind: SortKind,
        step: usize,
        status: StepStatus,
        sequence: Vec<u64>,
    },
    Status {
        message: String,
    },
    Highlight {
        index: usize,
        color: String,
    },
    Error(ErrorReport),
}
