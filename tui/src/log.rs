//! Terminal log: turns game notifications into narrative lines.

use std::time::Duration;

use hyresis_engine::{
    AttemptReport, Clause, ClauseSet, CommandOutput, FlowPhase, GameObserver, InputError, LogTone,
    ScriptLine, Symbol, TimingConfig, TraceBand, TraceLevel, content, join_symbols,
};
use hyresis_types::ui::ModalEffectKind;

use crate::playback::{LogLine, Playback};

/// Pause after generated lines so bursts stay readable.
const TYPED_LINE_PAUSE_MS: u64 = 120;

/// Observer that narrates the game into a [`Playback`] queue.
#[derive(Debug)]
pub struct TerminalLog {
    clauses: ClauseSet,
    playback: Playback,
    timing: TimingConfig,
    /// Clause announced but not yet opened.
    announced: Option<usize>,
    effect: Option<ModalEffectKind>,
}

impl TerminalLog {
    #[must_use]
    pub fn new(clauses: ClauseSet, timing: TimingConfig, reduced_motion: bool) -> Self {
        let typing = timing.typing_enabled && !reduced_motion;
        let char_delay = Duration::from_millis(timing.typing_char_delay_ms);
        let mut playback = Playback::new(typing, char_delay);
        playback.extend(content::opening_script());
        Self {
            clauses,
            playback,
            timing,
            announced: None,
            effect: None,
        }
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &LogLine> + DoubleEndedIterator {
        self.playback.lines()
    }

    /// Clause index waiting to be opened, if any.
    #[must_use]
    pub fn announced(&self) -> Option<usize> {
        self.announced
    }

    /// Overlay effect requested since the last call.
    pub fn take_effect(&mut self) -> Option<ModalEffectKind> {
        self.effect.take()
    }

    /// Append a line outside the game flow (e.g. a local notice).
    pub fn notice(&mut self, text: impl Into<String>, tone: LogTone) {
        self.line(text, tone);
    }

    fn line(&mut self, text: impl Into<String>, tone: LogTone) {
        self.playback
            .push(ScriptLine::new(text, tone, TYPED_LINE_PAUSE_MS));
    }

    /// Announcement lines follow the configured narrative pace.
    fn story(&mut self, text: impl Into<String>, tone: LogTone) {
        self.playback
            .push(ScriptLine::new(text, tone, self.timing.line_delay_ms));
    }

    fn system_notes(&mut self, report: &AttemptReport) {
        self.line("SYSTEM NOTE:", LogTone::Muted);
        for note in report.evaluation.alignment().notes() {
            self.line(format!("- {note}"), LogTone::Muted);
        }
    }

    fn announce(&mut self, clause: &Clause) {
        self.story(format!("---- CLAUSE {} DETECTED ----", clause.id), LogTone::Muted);
        self.story(clause.title.clone(), LogTone::Emphasis);
        self.story("Starting restoration procedure.", LogTone::Muted);

        if clause.is_formula_puzzle() {
            self.story("[FRAGMENT RECOVERED]", LogTone::Muted);
            self.story(clause.assemble_formula(&[]), LogTone::Emphasis);
            self.story("NOTICE:", LogTone::Warn);
            self.story(
                "This clause does not have a single correct sentence.",
                LogTone::Muted,
            );
            self.story("Only a sufficient structure.", LogTone::Muted);
            if !clause.hints.is_empty() {
                self.story(
                    format!("CLAUSE {} REQUIRES:", clause.roman_id()),
                    LogTone::Muted,
                );
                for hint in &clause.hints {
                    self.story(format!("- {hint}"), LogTone::Muted);
                }
            }
            if let Some(first) = clause.problem_lines.first() {
                self.story(format!("> {first}"), LogTone::Muted);
            }
            self.story("Block Status: UNRESOLVED", LogTone::Muted);
            self.story(
                format!("Recovered Lines: 0 / {}", clause.recoverable_lines()),
                LogTone::Muted,
            );
            self.story("> ENTER SYMBOL SEQUENCE:", LogTone::Emphasis);
            return;
        }

        if !clause.problem_title.is_empty() {
            self.story(clause.problem_title.clone(), LogTone::Emphasis);
        }
        for line in &clause.problem_lines {
            self.story(line.clone(), LogTone::Muted);
        }
        self.story(format!("Formula: {}", clause.masked_formula()), LogTone::Muted);
        self.story("Restore it as a symbol sequence.", LogTone::Muted);
    }
}

/// `phrase / phrase / ...`
fn interpretation(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|symbol| symbol.phrase())
        .collect::<Vec<_>>()
        .join(" / ")
}

fn reconstructed(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|symbol| symbol.phrase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn evaluation_message(clause: &Clause, report: &AttemptReport) -> (String, LogTone) {
    let evaluation = &report.evaluation;
    if evaluation.success() {
        return (
            format!("{} restoration signal confirmed. Integrity recovered.", clause.title),
            LogTone::Success,
        );
    }
    if evaluation.exact() + 1 >= clause.answer.len() {
        return (
            "Nearly aligned. Further verification required.".to_owned(),
            LogTone::Warn,
        );
    }
    if evaluation.exact() > 0 || evaluation.misplaced() > 0 {
        return (
            "Partial consistency detected. Restructure recommended.".to_owned(),
            LogTone::Emphasis,
        );
    }
    (
        "Insufficient correlation. Try another development.".to_owned(),
        LogTone::Alert,
    )
}

impl GameObserver for TerminalLog {
    fn on_attempt_result(&mut self, report: &AttemptReport) {
        let Some(clause) = self.clauses.get(report.clause_index).cloned() else {
            return;
        };
        let success = report.evaluation.success();

        if report.formula {
            let fills: Vec<Option<Symbol>> = report.attempt.iter().copied().map(Some).collect();
            self.line(clause.assemble_formula(&fills), LogTone::Emphasis);
            self.line(
                format!("> The observer {} defines itself.", reconstructed(&report.attempt)),
                LogTone::Muted,
            );
            self.system_notes(report);
            let (status, tone) = if success {
                ("RESOLVED", LogTone::Success)
            } else {
                ("UNRESOLVED", LogTone::Muted)
            };
            self.line(format!("Block Status: {status}"), tone);
            self.line(
                format!(
                    "Recovered Lines: {} / {}",
                    report.recovered_lines, report.recoverable_lines
                ),
                LogTone::Muted,
            );
            if !success {
                self.line("> ENTER SYMBOL SEQUENCE:", LogTone::Emphasis);
            }
        } else {
            self.line(
                format!("> INPUT: {}", join_symbols(&report.attempt)),
                LogTone::Emphasis,
            );
            self.line(
                format!("RECONSTRUCTED: {}", reconstructed(&report.attempt)),
                LogTone::Muted,
            );
            self.line(
                format!("INTERPRETATION: {}", interpretation(&report.attempt)),
                LogTone::Muted,
            );
            let (message, tone) = evaluation_message(&clause, report);
            self.line(format!("LOG: {message}"), tone);
            self.system_notes(report);
        }

        if success {
            self.line(format!("[RESTORED] {}", clause.core_line), LogTone::Success);
        } else {
            self.effect = Some(ModalEffectKind::Shake);
        }
    }

    fn on_input_rejected(&mut self, error: &InputError) {
        self.line(format!("[INPUT] {error}"), LogTone::Warn);
        if let Some(detail) = error.detail() {
            self.line(detail, LogTone::Muted);
        }
        self.effect = Some(ModalEffectKind::Shake);
    }

    fn on_clause_advanced(&mut self, clause_index: Option<usize>) {
        let Some(index) = clause_index else {
            self.announced = None;
            self.playback.extend(content::finale_script());
            return;
        };
        let Some(clause) = self.clauses.get(index).cloned() else {
            return;
        };
        if index > 0 {
            self.playback.push(ScriptLine::new(
                "",
                LogTone::Muted,
                self.timing.next_clause_delay_ms,
            ));
        }
        self.announce(&clause);
        self.announced = Some(index);
    }

    fn on_phase_changed(&mut self, phase: FlowPhase) {
        match phase {
            FlowPhase::WaitContinue => {
                self.line("> PRESS ENTER TO CONTINUE", LogTone::Emphasis);
            }
            FlowPhase::QuizLocked => {
                self.announced = None;
                self.effect = Some(ModalEffectKind::PopScale);
            }
            FlowPhase::Opening | FlowPhase::Streaming | FlowPhase::Ended => {}
        }
    }

    fn on_trace_changed(&mut self, level: TraceLevel) {
        if level.band() == TraceBand::Critical {
            self.line(format!("[TRACE] Exposure critical: {level}"), LogTone::Alert);
        }
    }

    fn on_command(&mut self, output: &CommandOutput) {
        self.line(format!("> {}", output.input), LogTone::Emphasis);
        for line in &output.lines {
            self.line(line.clone(), output.tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use hyresis_engine::{
        FlowPhase, GameObserver, HyresisConfig, InputError, PuzzleController, TimingConfig,
    };
    use hyresis_types::ui::ModalEffectKind;

    use super::TerminalLog;

    fn controller() -> PuzzleController<TerminalLog> {
        let settings = HyresisConfig::default().settings().unwrap();
        let log = TerminalLog::new(settings.clauses.clone(), TimingConfig::default(), false);
        PuzzleController::new(settings, log)
    }

    fn all_text(log: &mut TerminalLog) -> Vec<String> {
        log.playback_mut().skip();
        log.lines().map(|line| line.text.clone()).collect()
    }

    #[test]
    fn opening_script_is_queued_on_creation() {
        let mut controller = controller();
        let text = all_text(controller.observer_mut());
        assert_eq!(text.first().map(String::as_str), Some("connecting... vibelabs.hashed.com..."));
        assert_eq!(text.last().map(String::as_str), Some("> _"));
    }

    #[test]
    fn continue_announces_first_clause() {
        let mut controller = controller();
        controller.finish_opening();
        controller.request_continue();

        assert_eq!(controller.observer().announced(), Some(0));
        let text = all_text(controller.observer_mut());
        assert!(text.iter().any(|line| line == "---- CLAUSE 1 DETECTED ----"));
        assert!(text.iter().any(|line| line == "Observer(O) ___ ___ Definable(O, O)"));

        controller.request_continue();
        assert_eq!(controller.phase(), FlowPhase::QuizLocked);
        assert_eq!(controller.observer().announced(), None);
        assert_eq!(
            controller.observer_mut().take_effect(),
            Some(ModalEffectKind::PopScale)
        );
    }

    #[test]
    fn failed_attempt_shakes_and_reports_notes() {
        let mut controller = controller();
        controller.finish_opening();
        controller.request_continue();
        controller.request_continue();
        controller.observer_mut().take_effect();

        controller.submit_attempt("¬ ⇒");
        assert_eq!(
            controller.observer_mut().take_effect(),
            Some(ModalEffectKind::Shake)
        );
        let text = all_text(controller.observer_mut());
        assert!(text.iter().any(|line| line == "Observer(O) ¬ ⇒ Definable(O, O)"));
        assert!(text.iter().any(|line| line == "- Clause alignment: PARTIAL"));
        assert!(text.iter().any(|line| line == "Block Status: UNRESOLVED"));
    }

    #[test]
    fn success_restores_core_line_and_announces_next() {
        let mut controller = controller();
        controller.finish_opening();
        controller.request_continue();
        controller.request_continue();

        controller.submit_attempt("⇒ ¬");
        let text = all_text(controller.observer_mut());
        assert!(text.iter().any(|line| line.starts_with("[RESTORED] Self cannot")));
        assert!(text.iter().any(|line| line == "---- CLAUSE 2 DETECTED ----"));
        assert!(text.iter().any(|line| line == "Formula: [? ? ? ?]"));
        assert_eq!(controller.observer().announced(), Some(1));
    }

    #[test]
    fn rejection_prints_error_and_detail() {
        let settings = HyresisConfig::default().settings().unwrap();
        let mut log = TerminalLog::new(settings.clauses, TimingConfig::default(), true);
        log.playback_mut().skip();
        let before = log.lines().len();

        log.on_input_rejected(&InputError::InvalidSymbol {
            token: "x".to_owned(),
        });
        let text = all_text(&mut log);
        assert_eq!(text.len(), before + 2);
        assert_eq!(text[before], "[INPUT] symbol `x` is not allowed");
        assert!(text[before + 1].starts_with("allowed symbols: ∀ ∃"));
    }
}
