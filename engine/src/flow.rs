//! Phase transitions.
//!
//! The transition table is a pure function so the controller never mutates
//! the phase except through [`next_phase`].

use hyresis_types::FlowPhase;

/// Something that may move the flow forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTrigger {
    OpeningFinished,
    /// Player continue, or the automatic advance after an announcement.
    Continue,
    ClauseSolved,
}

/// Target phase for `trigger` in `phase`, or `None` when the trigger is not
/// accepted there. `clause_remains` is whether a clause is still unsolved
/// after the current one.
#[must_use]
pub fn next_phase(phase: FlowPhase, trigger: FlowTrigger, clause_remains: bool) -> Option<FlowPhase> {
    let after_clause = if clause_remains {
        FlowPhase::QuizLocked
    } else {
        FlowPhase::Ended
    };
    match (phase, trigger) {
        (FlowPhase::Opening, FlowTrigger::OpeningFinished) => Some(FlowPhase::WaitContinue),
        (FlowPhase::WaitContinue, FlowTrigger::Continue) => Some(FlowPhase::Streaming),
        (FlowPhase::Streaming, FlowTrigger::Continue) => Some(after_clause),
        (FlowPhase::QuizLocked, FlowTrigger::ClauseSolved) => Some(if clause_remains {
            FlowPhase::Streaming
        } else {
            FlowPhase::Ended
        }),
        _ => None,
    }
}
