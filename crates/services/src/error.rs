//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::OptionKey;

/// Errors emitted by quiz sessions.
///
/// Every variant is a rejected user action the UI is expected to have
/// disabled; fetch failures never surface here (see `QuizRunner::advance`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is currently displayed")]
    NoQuestion,

    #[error("cannot submit an empty selection")]
    EmptySelection,

    #[error("question was already submitted")]
    AlreadySubmitted,

    #[error("option {0} does not belong to the displayed question")]
    UnknownOption(OptionKey),
}
