use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::explanation::Explanation;
use crate::model::ids::{OptionKey, QuestionNumber};

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question number must be positive")]
    ZeroNumber,

    #[error("question prompt is blank")]
    BlankPrompt,

    #[error("question has no options")]
    NoOptions,

    #[error("duplicate option key: {0}")]
    DuplicateOptionKey(OptionKey),

    #[error("no correct answers declared")]
    NoCorrectAnswers,

    #[error("correct answer {0} is not among the options")]
    UnknownCorrectAnswer(OptionKey),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One selectable option, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    key: OptionKey,
    text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(key: OptionKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &OptionKey {
        &self.key
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A fetched multiple-choice question.
///
/// Immutable once constructed; a question appended to the history is
/// retained unchanged for the life of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    number: QuestionNumber,
    prompt: String,
    options: Vec<QuestionOption>,
    correct: BTreeSet<OptionKey>,
    explanation: Option<Explanation>,
}

impl Question {
    /// Validate and build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the number is zero, the prompt is blank,
    /// there are no options, an option key repeats, or the correct set is
    /// empty or names a key that is not an option.
    pub fn new(
        number: QuestionNumber,
        prompt: impl Into<String>,
        options: Vec<QuestionOption>,
        correct: impl IntoIterator<Item = OptionKey>,
        explanation: Option<Explanation>,
    ) -> Result<Self, QuestionError> {
        if number.value() == 0 {
            return Err(QuestionError::ZeroNumber);
        }

        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::BlankPrompt);
        }

        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut keys = BTreeSet::new();
        for option in &options {
            if !keys.insert(option.key().clone()) {
                return Err(QuestionError::DuplicateOptionKey(option.key().clone()));
            }
        }

        let correct: BTreeSet<OptionKey> = correct.into_iter().collect();
        if correct.is_empty() {
            return Err(QuestionError::NoCorrectAnswers);
        }
        if let Some(unknown) = correct.iter().find(|key| !keys.contains(*key)) {
            return Err(QuestionError::UnknownCorrectAnswer(unknown.clone()));
        }

        Ok(Self {
            number,
            prompt,
            options,
            correct,
            explanation,
        })
    }

    #[must_use]
    pub fn number(&self) -> QuestionNumber {
        self.number
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in presentation order.
    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_answers(&self) -> &BTreeSet<OptionKey> {
        &self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    /// True when several answers must be selected (checkbox semantics).
    #[must_use]
    pub fn is_multi_answer(&self) -> bool {
        self.correct.len() > 1
    }

    /// Number of selections a correct submission needs.
    #[must_use]
    pub fn required_selections(&self) -> usize {
        self.correct.len()
    }

    #[must_use]
    pub fn has_option(&self, key: &OptionKey) -> bool {
        self.options.iter().any(|option| option.key() == key)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
