//! The puzzle controller: one owner for all mutable game state.
//!
//! Every input goes through here. The controller validates it against the
//! current phase and clause, scores it, updates trace, locks and history,
//! drives the phase machine, and reports everything to its observer.

use tracing::{debug, info};

use hyresis_types::{
    Clause, ClauseSet, Evaluation, FlowPhase, InputError, Symbol, TraceLevel, join_symbols,
};

use crate::{
    GameObserver, GameSettings,
    evaluate,
    flow::{FlowTrigger, next_phase},
    history::{AttemptHistory, AttemptRecord},
    intel::SymbolIntel,
    slot_lock::SlotLocks,
    trace::TracePolicy,
};

/// Everything known about one evaluated attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub clause_index: usize,
    pub clause_id: u32,
    /// Symbols as typed. For formula clauses this covers only the open slots.
    pub submitted: Vec<Symbol>,
    /// Symbols as scored, locked slots included.
    pub attempt: Vec<Symbol>,
    pub evaluation: Evaluation,
    pub required_length: usize,
    pub formula: bool,
    /// Lock view after promotion.
    pub locks: Vec<Option<Symbol>>,
    /// Positions locked by this attempt.
    pub promoted: Vec<usize>,
    pub recovered_lines: usize,
    pub recoverable_lines: usize,
    pub fragment_progress: usize,
    pub fragment_total: usize,
}

/// Result of [`PuzzleController::submit_attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Attempts are not accepted in the current phase. Nothing changed.
    Ignored,
    Rejected(InputError),
    Evaluated(AttemptReport),
}

#[derive(Debug)]
pub struct PuzzleController<O = ()> {
    clauses: ClauseSet,
    policy: TracePolicy,
    phase: FlowPhase,
    clause_index: usize,
    recovered: usize,
    fragment_progress: usize,
    trace: TraceLevel,
    locks: SlotLocks,
    pending: Vec<Symbol>,
    intel: SymbolIntel,
    history: AttemptHistory,
    observer: O,
}

impl<O: GameObserver> PuzzleController<O> {
    #[must_use]
    pub fn new(settings: GameSettings, observer: O) -> Self {
        let GameSettings {
            clauses,
            trace,
            history_limit,
        } = settings;
        let first_slots = clauses.get(0).map_or(0, Clause::slot_count);
        Self {
            clauses,
            phase: FlowPhase::Opening,
            clause_index: 0,
            recovered: 0,
            fragment_progress: 0,
            trace: trace.initial_level(),
            policy: trace,
            locks: SlotLocks::new(first_slots),
            pending: Vec::new(),
            intel: SymbolIntel::default(),
            history: AttemptHistory::new(history_limit),
            observer,
        }
    }

    #[must_use]
    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    #[must_use]
    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    #[must_use]
    pub fn clause_index(&self) -> usize {
        self.clause_index
    }

    /// `None` once every clause has been restored.
    #[must_use]
    pub fn current_clause(&self) -> Option<&Clause> {
        self.clauses.get(self.clause_index)
    }

    #[must_use]
    pub fn recovered(&self) -> usize {
        self.recovered
    }

    #[must_use]
    pub fn fragment_progress(&self) -> usize {
        self.fragment_progress
    }

    #[must_use]
    pub fn trace(&self) -> TraceLevel {
        self.trace
    }

    #[must_use]
    pub fn locks(&self) -> &SlotLocks {
        &self.locks
    }

    #[must_use]
    pub fn pending(&self) -> &[Symbol] {
        &self.pending
    }

    #[must_use]
    pub fn intel(&self) -> &SymbolIntel {
        &self.intel
    }

    #[must_use]
    pub fn history(&self) -> &AttemptHistory {
        &self.history
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Symbols the current clause expects in the next attempt: the open slot
    /// count for formula clauses, the clause length otherwise.
    #[must_use]
    pub fn required_length(&self) -> usize {
        match self.current_clause() {
            Some(clause) if clause.is_formula_puzzle() => self.locks.remaining_slot_count(),
            Some(clause) => clause.slot_count(),
            None => 0,
        }
    }

    /// Current clause formula with locks and pending symbols filled in.
    #[must_use]
    pub fn formula_preview(&self) -> String {
        self.current_clause().map_or_else(String::new, |clause| {
            clause.assemble_formula(&self.locks.preview(&self.pending))
        })
    }

    /// Opening playback is over; wait for the player.
    pub fn finish_opening(&mut self) -> bool {
        self.apply_trigger(FlowTrigger::OpeningFinished)
    }

    /// Continue from the wait prompt, or open the announced clause.
    ///
    /// Returns whether the trigger was accepted in the current phase.
    pub fn request_continue(&mut self) -> bool {
        self.apply_trigger(FlowTrigger::Continue)
    }

    /// Append one symbol to the pending buffer. Refused outside the quiz or
    /// once the buffer holds as many symbols as the clause requires.
    pub fn push_symbol(&mut self, symbol: Symbol) -> bool {
        if !self.phase.accepts_attempts() || self.pending.len() >= self.required_length() {
            return false;
        }
        self.pending.push(symbol);
        true
    }

    pub fn pop_symbol(&mut self) -> Option<Symbol> {
        self.pending.pop()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Validate, score and apply one attempt.
    ///
    /// A blank `raw` submits the pending buffer when it holds symbols.
    pub fn submit_attempt(&mut self, raw: &str) -> SubmitOutcome {
        if !self.phase.accepts_attempts() {
            debug!(phase = %self.phase, "Attempt ignored");
            return SubmitOutcome::Ignored;
        }
        let Some(clause) = self.clauses.get(self.clause_index).cloned() else {
            return SubmitOutcome::Ignored;
        };

        let raw = if raw.trim().is_empty() && !self.pending.is_empty() {
            join_symbols(&self.pending)
        } else {
            raw.to_owned()
        };

        match self.validate(&clause, &raw) {
            Ok((submitted, attempt)) => {
                SubmitOutcome::Evaluated(self.evaluate_attempt(&clause, submitted, attempt))
            }
            Err(error) => {
                self.reject(&error);
                SubmitOutcome::Rejected(error)
            }
        }
    }

    /// Parse and length-check `raw`. Returns the symbols as typed and the
    /// full attempt; for formula clauses the latter has locked slots filled in.
    fn validate(
        &self,
        clause: &Clause,
        raw: &str,
    ) -> Result<(Vec<Symbol>, Vec<Symbol>), InputError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(InputError::EmptyInput);
        }

        let symbols = tokens
            .iter()
            .map(|token| {
                Symbol::parse(token).ok_or_else(|| InputError::InvalidSymbol {
                    token: (*token).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let received = symbols.len();
        if !clause.is_formula_puzzle() {
            let bounds = self.clauses.bounds();
            if !bounds.contains(received) {
                return Err(InputError::LengthMismatch {
                    required: clause.slot_count(),
                    received,
                    bounds: Some(bounds),
                });
            }
        }
        if clause.is_formula_puzzle() {
            let attempt = self.locks.build_full_attempt(&symbols)?;
            return Ok((symbols, attempt));
        }
        let required = self.required_length();
        if received != required {
            return Err(InputError::LengthMismatch {
                required,
                received,
                bounds: None,
            });
        }
        Ok((symbols.clone(), symbols))
    }

    fn reject(&mut self, error: &InputError) {
        debug!(kind = error.kind().as_str(), %error, "Attempt rejected");
        self.pending.clear();
        self.observer.on_input_rejected(error);
        let level = self.policy.after_rejection(self.trace, error);
        self.set_trace(level);
    }

    fn evaluate_attempt(
        &mut self,
        clause: &Clause,
        submitted: Vec<Symbol>,
        attempt: Vec<Symbol>,
    ) -> AttemptReport {
        let required_length = submitted.len();
        let formula = clause.is_formula_puzzle();

        let evaluation = evaluate(&clause.answer, &attempt);
        let promoted = if formula {
            let promoted = self.locks.promote_correct_slots(&attempt, &evaluation);
            self.fragment_progress = evaluation.exact().min(clause.fragment_total());
            promoted
        } else {
            Vec::new()
        };
        if evaluation.success() {
            self.fragment_progress = clause.fragment_total();
        }

        debug!(
            clause = clause.id,
            attempt = %join_symbols(&attempt),
            exact = evaluation.exact(),
            misplaced = evaluation.misplaced(),
            success = evaluation.success(),
            "Attempt evaluated"
        );

        let level = self.policy.after_evaluation(self.trace, &evaluation);
        self.set_trace(level);

        self.intel.record(&attempt, &evaluation);
        self.history
            .push(AttemptRecord::new(clause.id, attempt.clone(), &evaluation));
        self.pending.clear();

        let report = AttemptReport {
            clause_index: self.clause_index,
            clause_id: clause.id,
            submitted,
            attempt,
            required_length,
            formula,
            locks: self.locks.locks().to_vec(),
            promoted,
            recovered_lines: clause.recovered_lines(&evaluation),
            recoverable_lines: clause.recoverable_lines(),
            fragment_progress: self.fragment_progress,
            fragment_total: clause.fragment_total(),
            evaluation,
        };
        self.observer.on_attempt_result(&report);

        if report.evaluation.success() {
            self.complete_clause(clause);
        }
        report
    }

    fn complete_clause(&mut self, clause: &Clause) {
        self.recovered += 1;
        info!(
            clause = clause.id,
            recovered = self.recovered,
            total = self.clauses.len(),
            "Clause restored"
        );
        self.apply_trigger(FlowTrigger::ClauseSolved);
    }

    fn apply_trigger(&mut self, trigger: FlowTrigger) -> bool {
        let clause_remains = match trigger {
            FlowTrigger::ClauseSolved => self.clause_index + 1 < self.clauses.len(),
            FlowTrigger::OpeningFinished | FlowTrigger::Continue => {
                self.clause_index < self.clauses.len()
            }
        };
        let Some(next) = next_phase(self.phase, trigger, clause_remains) else {
            debug!(phase = %self.phase, ?trigger, "Trigger ignored");
            return false;
        };

        if trigger == FlowTrigger::ClauseSolved {
            self.clause_index += 1;
            self.enter_clause();
        }

        debug!(from = %self.phase, to = %next, ?trigger, "Phase transition");
        self.phase = next;
        self.observer.on_phase_changed(next);

        match (trigger, next) {
            (_, FlowPhase::Ended) => {
                info!(recovered = self.recovered, trace = %self.trace, "Game ended");
                self.observer.on_clause_advanced(None);
            }
            (FlowTrigger::ClauseSolved, _) | (FlowTrigger::Continue, FlowPhase::Streaming) => {
                self.observer.on_clause_advanced(Some(self.clause_index));
            }
            _ => {}
        }
        true
    }

    /// Reset per-clause state for the clause at `clause_index`.
    fn enter_clause(&mut self) {
        let slots = self.current_clause().map_or(0, Clause::slot_count);
        self.locks.reset(slots);
        self.pending.clear();
        self.intel.reset();
        self.fragment_progress = 0;
    }

    fn set_trace(&mut self, level: TraceLevel) {
        if level != self.trace {
            debug!(from = %self.trace, to = %level, "Trace changed");
            self.trace = level;
            self.observer.on_trace_changed(level);
        }
    }
}
