use std::collections::VecDeque;

use hyresis_types::{Evaluation, Symbol, join_symbols};

/// One evaluated attempt, as listed by the `history` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub clause_id: u32,
    pub attempt: Vec<Symbol>,
    pub exact: usize,
    pub misplaced: usize,
    pub success: bool,
}

impl AttemptRecord {
    #[must_use]
    pub fn new(clause_id: u32, attempt: Vec<Symbol>, evaluation: &Evaluation) -> Self {
        Self {
            clause_id,
            attempt,
            exact: evaluation.exact(),
            misplaced: evaluation.misplaced(),
            success: evaluation.success(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}  exact {} / misplaced {}{}",
            join_symbols(&self.attempt),
            self.exact,
            self.misplaced,
            if self.success { "  RESOLVED" } else { "" }
        )
    }
}

/// Most recent evaluated attempts, oldest evicted first.
#[derive(Debug, Clone)]
pub struct AttemptHistory {
    entries: VecDeque<AttemptRecord>,
    limit: usize,
}

impl AttemptHistory {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, record: AttemptRecord) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AttemptRecord> {
        self.entries.iter()
    }
}
