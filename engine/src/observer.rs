//! Boundary between the game core and whatever presents it.

use hyresis_types::{FlowPhase, InputError, TraceLevel};

use crate::{commands::CommandOutput, controller::AttemptReport};

/// Receives game notifications. Every method defaults to a no-op so a
/// presenter only implements what it renders.
pub trait GameObserver {
    fn on_attempt_result(&mut self, _report: &AttemptReport) {}

    fn on_input_rejected(&mut self, _error: &InputError) {}

    /// `Some(index)` announces the clause now current; `None` means the
    /// game is over.
    fn on_clause_advanced(&mut self, _clause_index: Option<usize>) {}

    fn on_phase_changed(&mut self, _phase: FlowPhase) {}

    /// Fired only when the level actually changed.
    fn on_trace_changed(&mut self, _level: TraceLevel) {}

    fn on_command(&mut self, _output: &CommandOutput) {}
}

/// Owned copy of one observer callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    AttemptResult(AttemptReport),
    InputRejected(InputError),
    ClauseAdvanced(Option<usize>),
    PhaseChanged(FlowPhase),
    TraceChanged(TraceLevel),
    Command(CommandOutput),
}

/// Recording sink.
impl GameObserver for Vec<GameEvent> {
    fn on_attempt_result(&mut self, report: &AttemptReport) {
        self.push(GameEvent::AttemptResult(report.clone()));
    }

    fn on_input_rejected(&mut self, error: &InputError) {
        self.push(GameEvent::InputRejected(error.clone()));
    }

    fn on_clause_advanced(&mut self, clause_index: Option<usize>) {
        self.push(GameEvent::ClauseAdvanced(clause_index));
    }

    fn on_phase_changed(&mut self, phase: FlowPhase) {
        self.push(GameEvent::PhaseChanged(phase));
    }

    fn on_trace_changed(&mut self, level: TraceLevel) {
        self.push(GameEvent::TraceChanged(level));
    }

    fn on_command(&mut self, output: &CommandOutput) {
        self.push(GameEvent::Command(output.clone()));
    }
}

/// Discards everything.
impl GameObserver for () {}
