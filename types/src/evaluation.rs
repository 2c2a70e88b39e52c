//! Scoring results for a single attempt.

use serde::{Deserialize, Serialize};

/// Per-position feedback for one attempt token.
///
/// Ordered by strength so `max` picks the best feedback a symbol has earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Symbol does not occur in any unmatched answer position.
    Absent,
    /// Symbol occurs in the answer, but at a different unmatched position.
    Present,
    /// Symbol matches the answer at this exact position.
    Correct,
}

impl SlotStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SlotStatus::Absent => "absent",
            SlotStatus::Present => "present",
            SlotStatus::Correct => "correct",
        }
    }
}

/// Coarse classification of an evaluation.
///
/// Drives both the trace adjustment and the system notes shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Every position matched.
    Complete,
    /// At least two exact or two misplaced matches.
    Partial,
    /// Some match, below the partial threshold.
    Weak,
    /// Nothing matched at all.
    Unaligned,
}

impl Alignment {
    /// Three system-note lines describing the alignment.
    #[must_use]
    pub const fn notes(self) -> [&'static str; 3] {
        match self {
            Alignment::Complete => [
                "Logical consistency: STRONG",
                "Clause alignment: COMPLETE",
                "Redundancy detected: NONE",
            ],
            Alignment::Partial => [
                "Logical consistency: STABLE",
                "Clause alignment: PARTIAL",
                "Redundancy detected",
            ],
            Alignment::Weak => [
                "Logical consistency: UNSTABLE",
                "Clause alignment: WEAK",
                "Overlap detected",
            ],
            Alignment::Unaligned => [
                "Logical consistency: UNVERIFIED",
                "Clause alignment: LOW",
                "Progress slowed",
            ],
        }
    }
}

/// Outcome of scoring an attempt against an answer.
///
/// Built from the per-position statuses so the counts can never disagree
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    exact: usize,
    misplaced: usize,
    success: bool,
    statuses: Vec<SlotStatus>,
}

impl Evaluation {
    #[must_use]
    pub fn from_statuses(statuses: Vec<SlotStatus>) -> Self {
        let exact = statuses
            .iter()
            .filter(|status| **status == SlotStatus::Correct)
            .count();
        let misplaced = statuses
            .iter()
            .filter(|status| **status == SlotStatus::Present)
            .count();
        Self {
            exact,
            misplaced,
            success: exact == statuses.len(),
            statuses,
        }
    }

    /// Number of tokens in the right position (bulls).
    #[must_use]
    pub fn exact(&self) -> usize {
        self.exact
    }

    /// Number of tokens present elsewhere in the answer (cows).
    #[must_use]
    pub fn misplaced(&self) -> usize {
        self.misplaced
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn statuses(&self) -> &[SlotStatus] {
        &self.statuses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        if self.success {
            Alignment::Complete
        } else if self.exact >= 2 || self.misplaced >= 2 {
            Alignment::Partial
        } else if self.exact > 0 || self.misplaced > 0 {
            Alignment::Weak
        } else {
            Alignment::Unaligned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Alignment, Evaluation, SlotStatus};

    #[test]
    fn counts_follow_statuses() {
        let eval = Evaluation::from_statuses(vec![
            SlotStatus::Correct,
            SlotStatus::Present,
            SlotStatus::Absent,
            SlotStatus::Present,
        ]);
        assert_eq!(eval.exact(), 1);
        assert_eq!(eval.misplaced(), 2);
        assert!(!eval.success());
        assert_eq!(eval.len(), 4);
    }

    #[test]
    fn all_correct_is_success() {
        let eval = Evaluation::from_statuses(vec![SlotStatus::Correct; 3]);
        assert!(eval.success());
        assert_eq!(eval.alignment(), Alignment::Complete);
    }

    #[test]
    fn alignment_thresholds() {
        let partial = Evaluation::from_statuses(vec![
            SlotStatus::Present,
            SlotStatus::Present,
            SlotStatus::Absent,
        ]);
        assert_eq!(partial.alignment(), Alignment::Partial);

        let weak = Evaluation::from_statuses(vec![
            SlotStatus::Correct,
            SlotStatus::Present,
            SlotStatus::Absent,
        ]);
        assert_eq!(weak.alignment(), Alignment::Weak);

        let none = Evaluation::from_statuses(vec![SlotStatus::Absent; 4]);
        assert_eq!(none.alignment(), Alignment::Unaligned);
    }

    #[test]
    fn status_ordering_prefers_correct() {
        assert!(SlotStatus::Correct > SlotStatus::Present);
        assert!(SlotStatus::Present > SlotStatus::Absent);
    }
}
