use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RunPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Precondition,
    InvalidState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("precondition failed: {message}")]
    Precondition { message: String },
    #[error("cannot {operation} while engine is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: RunPhase,
    },
}

impl EngineError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn invalid_state(operation: &'static str, phase: RunPhase) -> Self {
        Self::InvalidState { operation, phase }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Precondition { .. } => ErrorCode::Precondition,
            EngineError::InvalidState { .. } => ErrorCode::InvalidState,
        }
    }
}

/// Serializable form of an engine failure, for hosts that print or forward it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&EngineError> for ErrorReport {
    fn from(value: &EngineError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<EngineError> for ErrorReport {
    fn from(value: EngineError) -> Self {
        Self::from(&value)
    }
}
