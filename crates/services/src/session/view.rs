use quiz_core::model::{Explanation, OptionKey, QuestionNumber};

use super::service::{AttemptState, QuizSession};

/// Display status of one option; meaningful once the question is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionIndicator {
    /// No verdict to show.
    Neutral,
    /// A correct answer the user picked.
    CorrectSelected,
    /// A correct answer the user missed.
    CorrectMissed,
    /// A wrong answer the user picked.
    IncorrectSelected,
}

/// One option as a front-end should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub key: OptionKey,
    pub text: String,
    pub selected: bool,
    pub indicator: OptionIndicator,
}

/// Presentation-agnostic snapshot of the displayed question.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no styling assumptions
///
/// `from_session` returns `None` while the first question is still loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number: QuestionNumber,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// Checkbox semantics when true, radio semantics otherwise.
    pub multi_answer: bool,
    /// How many selections a correct submission needs ("select N answers").
    pub required_selections: usize,
    pub state: AttemptState,
    /// Present only after an incorrect submission on a question that carries
    /// one.
    pub explanation: Option<Explanation>,
}

impl QuestionView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let state = session.attempt_state();
        let submitted = matches!(state, AttemptState::Submitted { .. });

        let options = question
            .options()
            .iter()
            .map(|option| {
                let selected = session.selection().contains(option.key());
                let correct = question.correct_answers().contains(option.key());
                let indicator = if !submitted {
                    OptionIndicator::Neutral
                } else if correct && selected {
                    OptionIndicator::CorrectSelected
                } else if correct {
                    OptionIndicator::CorrectMissed
                } else if selected {
                    OptionIndicator::IncorrectSelected
                } else {
                    OptionIndicator::Neutral
                };
                OptionView {
                    key: option.key().clone(),
                    text: option.text().to_owned(),
                    selected,
                    indicator,
                }
            })
            .collect();

        let explanation = match state {
            AttemptState::Submitted { correct: false } => question.explanation().cloned(),
            _ => None,
        };

        Some(Self {
            number: question.number(),
            prompt: question.prompt().to_owned(),
            options,
            multi_answer: question.is_multi_answer(),
            required_selections: question.required_selections(),
            state,
            explanation,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
