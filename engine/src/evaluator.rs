//! Bulls & Cows scoring over arbitrary token alphabets.

use hyresis_types::{Evaluation, SlotStatus};

/// Score `attempt` against `answer`.
///
/// 1. First pass: mark exact matches (`Correct`), consuming both positions.
/// 2. Second pass: every unmatched attempt position takes the leftmost
///    unconsumed answer position holding the same token (`Present`), or
///    scores `Absent` when none is left.
///
/// The leftmost tie-break decides which duplicate gets credited, so it must
/// not be reordered.
///
/// Callers guarantee equal lengths; extra attempt tokens are ignored and a
/// short attempt scores its missing positions as `Absent`.
#[must_use]
pub fn evaluate<T: PartialEq>(answer: &[T], attempt: &[T]) -> Evaluation {
    debug_assert_eq!(answer.len(), attempt.len(), "length-checked by caller");

    let len = answer.len();
    let mut statuses = vec![SlotStatus::Absent; len];
    let mut answer_used = vec![false; len];

    // Pass 1: exact matches.
    for (i, (expected, given)) in answer.iter().zip(attempt).enumerate() {
        if expected == given {
            statuses[i] = SlotStatus::Correct;
            answer_used[i] = true;
        }
    }

    // Pass 2: present elsewhere.
    for (i, given) in attempt.iter().enumerate().take(len) {
        if statuses[i] == SlotStatus::Correct {
            continue;
        }
        let slot = answer
            .iter()
            .zip(answer_used.iter_mut())
            .find(|(expected, used)| !**used && *expected == given);
        if let Some((_, used)) = slot {
            *used = true;
            statuses[i] = SlotStatus::Present;
        }
    }

    Evaluation::from_statuses(statuses)
}
