//! Slot locking for formula puzzles.
//!
//! Positions scored `Correct` are fixed for the rest of the clause, so each
//! following attempt only needs the symbols for the still-open positions.
//! Locks only ever get added, which makes the puzzle converge: a player who
//! contributes one new correct symbol per round finishes in at most
//! `answer.len()` rounds.

use thiserror::Error;
use tracing::debug;

use hyresis_types::{Evaluation, InputError, SlotStatus, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} symbols for the open slots, got {got}")]
pub struct SlotLockError {
    pub expected: usize,
    pub got: usize,
}

impl From<SlotLockError> for InputError {
    fn from(error: SlotLockError) -> Self {
        InputError::LengthMismatch {
            required: error.expected,
            received: error.got,
            bounds: None,
        }
    }
}

/// Per-clause lock memory, parallel to the clause answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotLocks {
    slots: Vec<Option<Symbol>>,
}

impl SlotLocks {
    /// Fresh, fully open locks for a clause with `slot_count` positions.
    #[must_use]
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Clear every lock and resize for the next clause.
    pub fn reset(&mut self, slot_count: usize) {
        self.slots.clear();
        self.slots.resize(slot_count, None);
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn remaining_slot_count(&self) -> usize {
        self.slot_count() - self.locked_count()
    }

    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    /// Per-position view: `Some` for locked positions.
    #[must_use]
    pub fn locks(&self) -> &[Option<Symbol>] {
        &self.slots
    }

    /// Locks with `pending` symbols previewed in the open slots, left to right.
    ///
    /// Used for rendering the formula while the player is still typing, so
    /// it accepts fewer symbols than there are open slots.
    #[must_use]
    pub fn preview(&self, pending: &[Symbol]) -> Vec<Option<Symbol>> {
        let mut pending = pending.iter().copied();
        self.slots
            .iter()
            .map(|slot| slot.or_else(|| pending.next()))
            .collect()
    }

    /// Interleave locked symbols with `partial`, which fills the open
    /// positions in left-to-right order.
    pub fn build_full_attempt(&self, partial: &[Symbol]) -> Result<Vec<Symbol>, SlotLockError> {
        let expected = self.remaining_slot_count();
        if partial.len() != expected {
            return Err(SlotLockError {
                expected,
                got: partial.len(),
            });
        }
        let mut open = partial.iter().copied();
        self.slots
            .iter()
            .map(|slot| slot.or_else(|| open.next()))
            .collect::<Option<Vec<_>>>()
            .ok_or(SlotLockError {
                expected,
                got: partial.len(),
            })
    }

    /// Lock every `Correct` position of `evaluation` to the attempt's symbol.
    ///
    /// Already-locked positions are never touched. Returns the indices that
    /// were newly locked.
    pub fn promote_correct_slots(
        &mut self,
        full_attempt: &[Symbol],
        evaluation: &Evaluation,
    ) -> Vec<usize> {
        let mut promoted = Vec::new();
        for (index, status) in evaluation.statuses().iter().enumerate() {
            if *status != SlotStatus::Correct {
                continue;
            }
            let (Some(slot), Some(symbol)) = (self.slots.get_mut(index), full_attempt.get(index))
            else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(*symbol);
                promoted.push(index);
            }
        }
        if !promoted.is_empty() {
            debug!(?promoted, remaining = self.remaining_slot_count(), "Slots locked");
        }
        promoted
    }
}
