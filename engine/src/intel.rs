//! Best feedback per symbol within the current clause.

use std::collections::BTreeMap;

use hyresis_types::{Evaluation, SlotStatus, Symbol};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIntel {
    best: BTreeMap<Symbol, SlotStatus>,
}

impl SymbolIntel {
    /// Fold an evaluated attempt in. A symbol never loses status it earned.
    pub fn record(&mut self, attempt: &[Symbol], evaluation: &Evaluation) {
        for (symbol, status) in attempt.iter().zip(evaluation.statuses()) {
            self.best
                .entry(*symbol)
                .and_modify(|best| *best = (*best).max(*status))
                .or_insert(*status);
        }
    }

    #[must_use]
    pub fn status(&self, symbol: Symbol) -> Option<SlotStatus> {
        self.best.get(&symbol).copied()
    }

    pub fn reset(&mut self) {
        self.best.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SymbolIntel;
    use hyresis_types::{Evaluation, SlotStatus, Symbol};

    #[test]
    fn keeps_strongest_status() {
        let mut intel = SymbolIntel::default();
        intel.record(
            &[Symbol::Not, Symbol::Implies],
            &Evaluation::from_statuses(vec![SlotStatus::Present, SlotStatus::Absent]),
        );
        intel.record(
            &[Symbol::Implies, Symbol::Not],
            &Evaluation::from_statuses(vec![SlotStatus::Correct, SlotStatus::Absent]),
        );
        assert_eq!(intel.status(Symbol::Not), Some(SlotStatus::Present));
        assert_eq!(intel.status(Symbol::Implies), Some(SlotStatus::Correct));
        assert_eq!(intel.status(Symbol::Delta), None);

        intel.reset();
        assert!(intel.is_empty());
    }
}
