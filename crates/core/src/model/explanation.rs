use std::collections::BTreeMap;

use crate::model::ids::OptionKey;

/// One terminology entry: a concept paired with its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub concept: String,
    pub explanation: String,
}

/// Why a single option is right or wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRationale {
    pub is_correct: bool,
    pub reason: String,
}

/// Structured breakdown attached to a question, surfaced after an incorrect
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Explanation {
    /// Abilities the question is testing, in order.
    pub key_points: Vec<String>,
    /// Concept/explanation pairs, in order.
    pub terminology: Vec<TermEntry>,
    /// Per-option verdict and reasoning.
    pub option_rationale: BTreeMap<OptionKey, OptionRationale>,
}

impl Explanation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty()
            && self.terminology.is_empty()
            && self.option_rationale.is_empty()
    }
}
