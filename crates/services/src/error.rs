//! Shared error types for the services crate.

use thiserror::Error;

use portal_core::model::{Container, QuestionId};
use storage::StorageError;

/// Errors emitted by the solving session and its orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The question set was empty. The caller offers a way back.
    #[error("session has no questions")]
    InvalidState,
    #[error("question {id} appears more than once")]
    DuplicateQuestion { id: QuestionId },
    #[error("{container} was not found")]
    NotFound { container: Container },
    #[error("question index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{value:?} is not a choice of question {question_id}")]
    InvalidChoice { question_id: QuestionId, value: String },
    #[error("submission has not been requested")]
    NotAwaitingConfirmation,
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("no submission is in flight")]
    NoSubmitInFlight,
    /// Recoverable; answers are kept and the learner may submit again.
    #[error("submission failed: {0}")]
    TransientSubmitFailure(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised while reading service configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {key} value: {raw:?}")]
    InvalidValue { key: &'static str, raw: String },
}
