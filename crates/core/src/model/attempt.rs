use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::ids::{OptionKey, QuestionNumber};

/// A recorded submission for one question.
///
/// Attempts exist only once a submission happened; a question the user never
/// submitted has no entry in the cache. The correctness verdict is *not*
/// stored here; it is recomputed from the question whenever the attempt is
/// restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    selected: Vec<OptionKey>,
    submitted_at: DateTime<Utc>,
}

impl Attempt {
    #[must_use]
    pub fn new(selected: Vec<OptionKey>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            selected,
            submitted_at,
        }
    }

    /// Selected options in the order the user picked them.
    #[must_use]
    pub fn selected(&self) -> &[OptionKey] {
        &self.selected
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Keyed store of attempts, at most one per question.
///
/// Owned exclusively by the session; entries never expire while the session
/// lives. Inserted on submit, removed on reset.
#[derive(Debug, Clone, Default)]
pub struct AttemptCache {
    entries: HashMap<QuestionNumber, Attempt>,
}

impl AttemptCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, number: QuestionNumber) -> Option<&Attempt> {
        self.entries.get(&number)
    }

    /// Insert or overwrite the attempt for `number`.
    pub fn record(&mut self, number: QuestionNumber, attempt: Attempt) {
        self.entries.insert(number, attempt);
    }

    /// Remove the attempt for `number`. No-op if absent.
    pub fn clear(&mut self, number: QuestionNumber) -> Option<Attempt> {
        self.entries.remove(&number)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
