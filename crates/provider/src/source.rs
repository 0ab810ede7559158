use async_trait::async_trait;
use thiserror::Error;

use quiz_core::model::{CertificationTrack, Question, QuestionError, QuestionNumber, UserId};

/// Errors surfaced by question sources.
///
/// The variants are distinguishable for logging and tests; the session layer
/// treats every one of them uniformly as "no question available".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The pool has no question at the requested index, or answered with
    /// `success: false`.
    #[error("no question available at index {0}")]
    Unavailable(QuestionNumber),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response status {0}")]
    Status(u16),

    #[error("undecodable question payload: {0}")]
    Decode(String),

    #[error("invalid question payload: {0}")]
    Invalid(#[from] QuestionError),
}

/// Contract for the remote question pool.
///
/// Indexes are 1-based and requested sequentially within a session; the pool
/// is free to stop producing at any index.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the question at `number` for the given user and track.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when no question can be produced. No retry is
    /// performed at this layer.
    async fn question(
        &self,
        user: &UserId,
        track: &CertificationTrack,
        number: QuestionNumber,
    ) -> Result<Question, SourceError>;
}
