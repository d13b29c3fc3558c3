//! Step-wise radix sort over non-negative integers.
//!
//! [`RadixEngine`] owns one run at a time and performs a single bounded unit of
//! work per [`RadixEngine::step`] call, so a host can render every intermediate
//! ordering and pause between units.

pub mod digits;
mod engine;
mod lsd;
mod msd;

pub use engine::{CursorPosition, EngineOptions, RadixEngine};
pub use shared::{
    domain::{RunPhase, SortKind, StepResult, StepStatus},
    error::EngineError,
};
