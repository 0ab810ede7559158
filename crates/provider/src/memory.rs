use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quiz_core::model::{CertificationTrack, Question, QuestionNumber, UserId};

use crate::source::{QuestionSource, SourceError};

#[derive(Default)]
struct Inner {
    questions: BTreeMap<QuestionNumber, Question>,
    fetches: usize,
}

/// Scripted in-memory question source for testing and prototyping.
///
/// Serves pre-loaded questions by number, ignoring user and track, and
/// counts every fetch issued (including misses) so tests can assert that
/// replayed questions are never re-fetched.
#[derive(Clone, Default)]
pub struct ScriptedQuestionSource {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `question` available at its own number.
    pub fn push(&self, question: Question) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.questions.insert(question.number(), question);
        }
    }

    /// Number of fetches issued so far, counting failures.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.inner.lock().map(|guard| guard.fetches).unwrap_or(0)
    }
}

#[async_trait]
impl QuestionSource for ScriptedQuestionSource {
    async fn question(
        &self,
        _user: &UserId,
        _track: &CertificationTrack,
        number: QuestionNumber,
    ) -> Result<Question, SourceError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        guard.fetches += 1;
        guard
            .questions
            .get(&number)
            .cloned()
            .ok_or(SourceError::Unavailable(number))
    }
}
