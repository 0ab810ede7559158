//! Correctness evaluation for submitted selections.

use std::collections::BTreeSet;

use crate::model::OptionKey;

/// True iff the selection matches the canonical answer set exactly.
///
/// Pure set equality: order is irrelevant and duplicate selections collapse
/// before comparison. Used both at submission time and whenever a cached
/// attempt is restored, so a displayed verdict is always recomputed rather
/// than stored.
#[must_use]
pub fn is_exact_match(correct: &BTreeSet<OptionKey>, selected: &[OptionKey]) -> bool {
    let chosen: BTreeSet<&OptionKey> = selected.iter().collect();
    chosen.len() == correct.len() && chosen.iter().all(|key| correct.contains(*key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> BTreeSet<OptionKey> {
        keys.iter().map(|key| OptionKey::from(*key)).collect()
    }

    fn selection(keys: &[&str]) -> Vec<OptionKey> {
        keys.iter().map(|key| OptionKey::from(*key)).collect()
    }

    #[test]
    fn order_is_irrelevant() {
        assert!(is_exact_match(&set(&["A", "B"]), &selection(&["B", "A"])));
    }

    #[test]
    fn missing_answer_fails() {
        assert!(!is_exact_match(&set(&["A", "B"]), &selection(&["A"])));
    }

    #[test]
    fn extra_answer_fails() {
        assert!(!is_exact_match(&set(&["A"]), &selection(&["A", "B"])));
    }

    #[test]
    fn empty_selection_never_matches() {
        assert!(!is_exact_match(&set(&["A"]), &selection(&[])));
    }

    #[test]
    fn duplicate_selections_collapse() {
        assert!(is_exact_match(&set(&["A"]), &selection(&["A", "A"])));
    }
}
