use thiserror::Error;

use crate::model::{Question, QuestionNumber};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("question {got} does not extend history ending at {last}")]
    NonMonotonic {
        last: QuestionNumber,
        got: QuestionNumber,
    },
}

/// Append-only record of fetched questions plus the display cursor.
///
/// The cursor is a 0-based index into the sequence, `None` until the first
/// question arrives. Entries are never reordered or truncated; appending
/// enforces strictly increasing question numbers.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Question>,
    cursor: Option<usize>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Questions fetched so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The question under the cursor, if anything has loaded.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.cursor.and_then(|at| self.entries.get(at))
    }

    /// 1-based position of the displayed question; 0 before the first load.
    #[must_use]
    pub fn viewed(&self) -> usize {
        self.cursor.map_or(0, |at| at + 1)
    }

    /// True when stepping back would be a no-op.
    #[must_use]
    pub fn at_first(&self) -> bool {
        self.cursor.is_none_or(|at| at == 0)
    }

    /// True when moving forward requires a fetch rather than a replay.
    #[must_use]
    pub fn at_latest(&self) -> bool {
        match self.cursor {
            Some(at) => at + 1 == self.entries.len(),
            None => true,
        }
    }

    /// Index to request next from the question pool.
    #[must_use]
    pub fn next_number(&self) -> QuestionNumber {
        let fetched = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        QuestionNumber::new(fetched.saturating_add(1))
    }

    /// Step the cursor back one entry and return the now-displayed question.
    ///
    /// Returns `None` at the first entry (or before the first load); the
    /// cursor does not move in that case.
    pub fn step_back(&mut self) -> Option<&Question> {
        let at = self.cursor?;
        if at == 0 {
            return None;
        }
        self.cursor = Some(at - 1);
        self.entries.get(at - 1)
    }

    /// Step the cursor forward over an already-fetched entry.
    ///
    /// This is a pure replay: `None` means the cursor is at the newest entry
    /// and advancing needs a fetch instead.
    pub fn step_forward(&mut self) -> Option<&Question> {
        let at = self.cursor?;
        if at + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(at + 1);
        self.entries.get(at + 1)
    }

    /// Append a newly fetched question and move the cursor onto it.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NonMonotonic` when `question` does not carry a
    /// number strictly greater than the newest entry; the sequence is left
    /// untouched.
    pub fn append(&mut self, question: Question) -> Result<&Question, HistoryError> {
        if let Some(last) = self.entries.last() {
            if question.number() <= last.number() {
                return Err(HistoryError::NonMonotonic {
                    last: last.number(),
                    got: question.number(),
                });
            }
        }
        self.entries.push(question);
        let at = self.entries.len() - 1;
        self.cursor = Some(at);
        Ok(&self.entries[at])
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
