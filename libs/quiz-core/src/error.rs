//! Error types for quiz-core.

use crate::types::Phase;
use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Calls the session rejects. A rejected call never changes session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {operation} while the session is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("no questions to load")]
    NoQuestions,

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },
}

/// Errors from a key/value store backing saved questions.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}
