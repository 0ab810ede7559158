use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::grading;
use quiz_core::history::{History, HistoryError};
use quiz_core::model::{
    Attempt, AttemptCache, CertificationTrack, OptionKey, Question, QuestionNumber, UserId,
};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── ATTEMPT STATE ─────────────────────────────────────────────────────────────
//

/// Answer state of the displayed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Nothing selected yet.
    Unanswered,
    /// At least one option selected, not yet submitted.
    Selecting,
    /// Submitted. The verdict is recomputed on every display, never stored.
    Submitted { correct: bool },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session for one user and certification track.
///
/// Owns the question history, the attempt cache and the working selection
/// for the displayed question. All methods here are synchronous state
/// transitions; fetching lives in `QuizRunner`. Before the first question
/// arrives `current_question()` is `None` and every answer action is
/// rejected with `SessionError::NoQuestion`.
pub struct QuizSession {
    user_id: UserId,
    track: CertificationTrack,
    history: History,
    attempts: AttemptCache,
    selection: Vec<OptionKey>,
    verdict: Option<bool>,
    started_at: DateTime<Utc>,
    fetch_in_flight: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(user_id: UserId, track: CertificationTrack, started_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            track,
            history: History::new(),
            attempts: AttemptCache::new(),
            selection: Vec::new(),
            verdict: None,
            started_at,
            fetch_in_flight: false,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn track(&self) -> &CertificationTrack {
        &self.track
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.history.current()
    }

    /// Selected options for the displayed question, in pick order.
    #[must_use]
    pub fn selection(&self) -> &[OptionKey] {
        &self.selection
    }

    #[must_use]
    pub fn attempt_state(&self) -> AttemptState {
        match self.verdict {
            Some(correct) => AttemptState::Submitted { correct },
            None if self.selection.is_empty() => AttemptState::Unanswered,
            None => AttemptState::Selecting,
        }
    }

    /// The submit affordance: true only while a non-empty selection awaits
    /// submission.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.history.current().is_some() && self.verdict.is_none() && !self.selection.is_empty()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            viewed: self.history.viewed(),
            fetched: self.history.len(),
            at_first: self.history.at_first(),
            at_latest: self.history.at_latest(),
        }
    }

    /// Toggle an option on the displayed question.
    ///
    /// Single-answer questions use radio semantics (the selection is
    /// replaced); multi-answer questions use checkbox semantics (the key is
    /// toggled in or out).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` before the first question,
    /// `SessionError::AlreadySubmitted` after submission, or
    /// `SessionError::UnknownOption` for a key the question does not carry.
    pub fn toggle_option(&mut self, key: &OptionKey) -> Result<(), SessionError> {
        let Some(question) = self.history.current() else {
            return Err(SessionError::NoQuestion);
        };
        if self.verdict.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        if !question.has_option(key) {
            return Err(SessionError::UnknownOption(key.clone()));
        }

        if question.is_multi_answer() {
            if let Some(at) = self.selection.iter().position(|picked| picked == key) {
                self.selection.remove(at);
            } else {
                self.selection.push(key.clone());
            }
        } else {
            self.selection.clear();
            self.selection.push(key.clone());
        }
        Ok(())
    }

    /// Submit the current selection, recording the attempt and returning the
    /// verdict. Submission is permanent for this question except via
    /// [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` before the first question,
    /// `SessionError::AlreadySubmitted` on a second submit, or
    /// `SessionError::EmptySelection` when nothing is selected.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        let Some(question) = self.history.current() else {
            return Err(SessionError::NoQuestion);
        };
        if self.verdict.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let correct = grading::is_exact_match(question.correct_answers(), &self.selection);
        let number = question.number();
        self.attempts
            .record(number, Attempt::new(self.selection.clone(), now));
        self.verdict = Some(correct);
        Ok(correct)
    }

    /// Clear the displayed question back to unanswered, removing its cached
    /// attempt so a fresh submission is possible.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` before the first question.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let Some(question) = self.history.current() else {
            return Err(SessionError::NoQuestion);
        };
        let number = question.number();
        self.selection.clear();
        self.verdict = None;
        self.attempts.clear(number);
        Ok(())
    }

    /// Go back one question. Pure replay: returns false at the first
    /// question and leaves all state untouched.
    pub fn previous(&mut self) -> bool {
        if self.history.step_back().is_some() {
            self.restore_current();
            true
        } else {
            false
        }
    }

    pub(crate) fn replay_next(&mut self) -> bool {
        if self.history.step_forward().is_some() {
            self.restore_current();
            true
        } else {
            false
        }
    }

    pub(crate) fn append_question(&mut self, question: Question) -> Result<(), HistoryError> {
        self.history.append(question)?;
        self.restore_current();
        Ok(())
    }

    pub(crate) fn next_number(&self) -> QuestionNumber {
        self.history.next_number()
    }

    // The in-flight guard serializes fetches: `begin_fetch` refuses while an
    // advance is outstanding, so history order stays monotonic even when the
    // session sits behind interior mutability. Stays engaged if the advance
    // future is dropped mid-fetch; cancellation is unsupported.
    pub(crate) fn begin_fetch(&mut self) -> bool {
        if self.fetch_in_flight {
            return false;
        }
        self.fetch_in_flight = true;
        true
    }

    pub(crate) fn end_fetch(&mut self) {
        self.fetch_in_flight = false;
    }

    // Derive the answer state for a newly displayed question. The attempt
    // cache is consulted exactly once per display change, and the verdict of
    // a restored attempt is recomputed rather than read from the cache.
    fn restore_current(&mut self) {
        let Some(question) = self.history.current() else {
            self.selection.clear();
            self.verdict = None;
            return;
        };

        match self.attempts.get(question.number()) {
            Some(attempt) => {
                self.verdict = Some(grading::is_exact_match(
                    question.correct_answers(),
                    attempt.selected(),
                ));
                self.selection = attempt.selected().to_vec();
            }
            None => {
                self.selection.clear();
                self.verdict = None;
            }
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("user_id", &self.user_id)
            .field("track", &self.track)
            .field("fetched", &self.history.len())
            .field("viewed", &self.history.viewed())
            .field("attempts", &self.attempts.len())
            .field("fetch_in_flight", &self.fetch_in_flight)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionOption;
    use quiz_core::time::fixed_now;

    fn build_question(number: u32, correct: &[&str]) -> Question {
        Question::new(
            QuestionNumber::new(number),
            format!("Prompt {number}"),
            vec![
                QuestionOption::new(OptionKey::from("A"), "first"),
                QuestionOption::new(OptionKey::from("B"), "second"),
                QuestionOption::new(OptionKey::from("C"), "third"),
            ],
            correct.iter().map(|key| OptionKey::from(*key)),
            None,
        )
        .unwrap()
    }

    fn build_session() -> QuizSession {
        QuizSession::new(
            UserId::new("u1"),
            CertificationTrack::new("saa-c03"),
            fixed_now(),
        )
    }

    #[test]
    fn fresh_session_is_loading() {
        let session = build_session();
        assert!(session.current_question().is_none());
        assert_eq!(session.attempt_state(), AttemptState::Unanswered);
        assert_eq!(session.progress().viewed, 0);
        assert!(!session.can_submit());
    }

    #[test]
    fn actions_before_first_question_are_rejected() {
        let mut session = build_session();
        assert_eq!(
            session.toggle_option(&OptionKey::from("A")),
            Err(SessionError::NoQuestion)
        );
        assert_eq!(session.submit(fixed_now()), Err(SessionError::NoQuestion));
        assert_eq!(session.reset(), Err(SessionError::NoQuestion));
    }

    #[test]
    fn radio_selection_replaces_prior_pick() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        session.toggle_option(&OptionKey::from("A")).unwrap();
        session.toggle_option(&OptionKey::from("B")).unwrap();

        assert_eq!(session.selection(), [OptionKey::from("B")]);
        assert_eq!(session.attempt_state(), AttemptState::Selecting);
    }

    #[test]
    fn checkbox_selection_toggles_in_and_out() {
        let mut session = build_session();
        session
            .append_question(build_question(1, &["A", "C"]))
            .unwrap();

        session.toggle_option(&OptionKey::from("A")).unwrap();
        session.toggle_option(&OptionKey::from("B")).unwrap();
        session.toggle_option(&OptionKey::from("A")).unwrap();

        assert_eq!(session.selection(), [OptionKey::from("B")]);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        assert_eq!(
            session.toggle_option(&OptionKey::from("Z")),
            Err(SessionError::UnknownOption(OptionKey::from("Z")))
        );
    }

    #[test]
    fn submit_requires_a_selection() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        assert_eq!(
            session.submit(fixed_now()),
            Err(SessionError::EmptySelection)
        );
        assert!(!session.can_submit());
    }

    #[test]
    fn submission_is_permanent_until_reset() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        session.toggle_option(&OptionKey::from("A")).unwrap();
        assert!(session.can_submit());
        assert!(session.submit(fixed_now()).unwrap());

        assert_eq!(
            session.submit(fixed_now()),
            Err(SessionError::AlreadySubmitted)
        );
        assert_eq!(
            session.toggle_option(&OptionKey::from("B")),
            Err(SessionError::AlreadySubmitted)
        );
        assert_eq!(
            session.attempt_state(),
            AttemptState::Submitted { correct: true }
        );
    }

    #[test]
    fn reset_allows_a_fresh_attempt() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        session.toggle_option(&OptionKey::from("B")).unwrap();
        assert!(!session.submit(fixed_now()).unwrap());

        session.reset().unwrap();
        assert_eq!(session.attempt_state(), AttemptState::Unanswered);
        assert!(session.selection().is_empty());

        session.toggle_option(&OptionKey::from("A")).unwrap();
        assert!(session.submit(fixed_now()).unwrap());
    }

    #[test]
    fn cached_attempt_is_restored_with_recomputed_verdict() {
        let mut session = build_session();
        session
            .append_question(build_question(1, &["A", "B"]))
            .unwrap();

        session.toggle_option(&OptionKey::from("B")).unwrap();
        session.toggle_option(&OptionKey::from("A")).unwrap();
        assert!(session.submit(fixed_now()).unwrap());

        session.append_question(build_question(2, &["A"])).unwrap();
        assert_eq!(session.attempt_state(), AttemptState::Unanswered);

        assert!(session.previous());
        assert_eq!(
            session.attempt_state(),
            AttemptState::Submitted { correct: true }
        );
        assert_eq!(
            session.selection(),
            [OptionKey::from("B"), OptionKey::from("A")]
        );
    }

    #[test]
    fn reset_clears_the_cache_entry() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();

        session.toggle_option(&OptionKey::from("B")).unwrap();
        session.submit(fixed_now()).unwrap();
        session.reset().unwrap();

        session.append_question(build_question(2, &["A"])).unwrap();
        assert!(session.previous());
        assert_eq!(session.attempt_state(), AttemptState::Unanswered);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn previous_at_first_question_is_a_no_op() {
        let mut session = build_session();
        session.append_question(build_question(1, &["A"])).unwrap();
        session.toggle_option(&OptionKey::from("A")).unwrap();

        assert!(!session.previous());
        assert_eq!(session.selection(), [OptionKey::from("A")]);
        assert_eq!(session.attempt_state(), AttemptState::Selecting);
        assert_eq!(session.progress().viewed, 1);
    }

    #[test]
    fn fetch_guard_engages_once() {
        let mut session = build_session();
        assert!(session.begin_fetch());
        assert!(!session.begin_fetch());
        assert!(session.is_fetching());

        session.end_fetch();
        assert!(session.begin_fetch());
    }
}
