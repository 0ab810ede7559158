use std::sync::Arc;

use provider::{QuestionSource, SourceError};
use quiz_core::Clock;
use quiz_core::model::{CertificationTrack, UserId};

use super::service::QuizSession;
use crate::error::SessionError;

/// Outcome of a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The cursor moved; a question is displayed.
    Displayed,
    /// No question could be produced; history and cursor are unchanged. The
    /// same action can simply be retried.
    Unavailable,
    /// A fetch is already in flight; the action was ignored.
    Busy,
}

/// Drives session navigation against a question source.
///
/// This is the single place where fetch-vs-replay is decided: advancing
/// replays a question already in history when the cursor sits behind the
/// newest entry, and fetches the next index otherwise.
#[derive(Clone)]
pub struct QuizRunner {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
}

impl QuizRunner {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self { clock, source }
    }

    /// Start a session for the given user and track, fetching question 1.
    ///
    /// A failed first fetch leaves the session in its loading state; the
    /// next `advance` retries from the user's action.
    pub async fn start(&self, user_id: UserId, track: CertificationTrack) -> QuizSession {
        let mut session = QuizSession::new(user_id, track, self.clock.now());
        self.advance(&mut session).await;
        session
    }

    /// Move forward one question.
    ///
    /// Fetch failures are swallowed by design: the outcome is `Unavailable`,
    /// session state is untouched and the cause is only logged. A question
    /// arriving with a non-increasing number is discarded the same way.
    pub async fn advance(&self, session: &mut QuizSession) -> AdvanceOutcome {
        if !session.begin_fetch() {
            return AdvanceOutcome::Busy;
        }

        let outcome = if session.replay_next() {
            AdvanceOutcome::Displayed
        } else {
            let number = session.next_number();
            match self
                .source
                .question(session.user_id(), session.track(), number)
                .await
            {
                Ok(question) => match session.append_question(question) {
                    Ok(()) => AdvanceOutcome::Displayed,
                    Err(err) => {
                        tracing::warn!(%number, error = %err, "discarded out-of-order question");
                        AdvanceOutcome::Unavailable
                    }
                },
                Err(err) => {
                    log_fetch_failure(&err, session);
                    AdvanceOutcome::Unavailable
                }
            }
        };

        session.end_fetch();
        outcome
    }

    /// Go back one question. Pure replay, never fetches; `Unavailable` at
    /// the first question (a no-op).
    pub fn retreat(&self, session: &mut QuizSession) -> AdvanceOutcome {
        if session.previous() {
            AdvanceOutcome::Displayed
        } else {
            AdvanceOutcome::Unavailable
        }
    }

    /// Submit the current selection, stamping the attempt with this runner's
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for a rejected submission (nothing displayed,
    /// empty selection, or already submitted).
    pub fn submit(&self, session: &mut QuizSession) -> Result<bool, SessionError> {
        session.submit(self.clock.now())
    }
}

fn log_fetch_failure(err: &SourceError, session: &QuizSession) {
    tracing::debug!(
        user = %session.user_id(),
        track = %session.track(),
        error = %err,
        "question fetch failed"
    );
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
