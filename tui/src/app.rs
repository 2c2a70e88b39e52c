//! Presentation state: the controller plus everything only the terminal needs.

use std::mem::take;
use std::time::Duration;

use hyresis_engine::{
    ConfigError, FlowPhase, GameSettings, HyresisConfig, LogTone, PuzzleController,
    SubmitOutcome, Symbol, TimingConfig, join_symbols,
};
use hyresis_types::ui::{
    HistoryLane, InputHistory, ModalEffect, ModalEffectKind, NavOutcome, UiOptions,
};

use crate::log::TerminalLog;

const POP_SCALE_DURATION: Duration = Duration::from_millis(220);
const SHAKE_DURATION: Duration = Duration::from_millis(260);

/// Longest draft accepted from the keyboard.
const MAX_DRAFT_CHARS: usize = 120;

#[derive(Debug)]
pub struct GameApp {
    controller: PuzzleController<TerminalLog>,
    options: UiOptions,
    timing: TimingConfig,
    draft: String,
    history: InputHistory,
    palette_cursor: usize,
    effect: Option<ModalEffect>,
    tick: usize,
    should_quit: bool,
}

impl GameApp {
    #[must_use]
    pub fn new(settings: GameSettings, timing: TimingConfig, options: UiOptions) -> Self {
        let log = TerminalLog::new(settings.clauses.clone(), timing, options.reduced_motion);
        Self {
            controller: PuzzleController::new(settings, log),
            options,
            timing,
            draft: String::new(),
            history: InputHistory::default(),
            palette_cursor: 0,
            effect: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn from_config(config: &HyresisConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.settings()?,
            config.timing,
            config.app.ui_options(),
        ))
    }

    #[must_use]
    pub fn controller(&self) -> &PuzzleController<TerminalLog> {
        &self.controller
    }

    #[must_use]
    pub fn log(&self) -> &TerminalLog {
        self.controller.observer()
    }

    #[must_use]
    pub fn phase(&self) -> FlowPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn modal_effect(&self) -> Option<&ModalEffect> {
        self.effect.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn playback_idle(&self) -> bool {
        self.log().playback().is_idle()
    }

    /// Advance animation and playback by one frame and fire the automatic
    /// transitions that wait on playback.
    pub fn tick(&mut self, delta: Duration) {
        self.tick = self.tick.wrapping_add(1);

        if let Some(effect) = self.effect.as_mut() {
            effect.advance(delta);
            if effect.is_finished() {
                self.effect = None;
            }
        }

        self.controller.observer_mut().playback_mut().advance(delta);
        self.start_requested_effect();

        if !self.playback_idle() {
            return;
        }
        match self.controller.phase() {
            FlowPhase::Opening => {
                self.controller.finish_opening();
            }
            FlowPhase::Streaming
                if self.timing.auto_open_quiz && self.log().announced().is_some() =>
            {
                self.open_quiz();
            }
            _ => {}
        }
    }

    fn start_requested_effect(&mut self) {
        let Some(kind) = self.controller.observer_mut().take_effect() else {
            return;
        };
        if self.options.reduced_motion {
            return;
        }
        self.effect = Some(match kind {
            ModalEffectKind::PopScale => ModalEffect::pop_scale(POP_SCALE_DURATION),
            ModalEffectKind::Shake => ModalEffect::shake(SHAKE_DURATION),
        });
    }

    fn open_quiz(&mut self) {
        if self.controller.request_continue() {
            self.draft.clear();
            self.palette_cursor = 0;
            self.history.reset_navigation();
        }
    }

    /// Reveal all queued narrative at once.
    pub fn skip_playback(&mut self) {
        self.controller.observer_mut().playback_mut().skip();
    }

    /// Enter key. What it means depends on the phase.
    pub fn confirm(&mut self) {
        match self.controller.phase() {
            FlowPhase::Opening => self.skip_playback(),
            FlowPhase::WaitContinue => {
                if self.playback_idle() {
                    self.controller.request_continue();
                } else {
                    self.skip_playback();
                }
            }
            FlowPhase::Streaming => self.submit_terminal(),
            FlowPhase::QuizLocked => self.submit_quiz_draft(),
            FlowPhase::Ended => {
                if self.playback_idle() {
                    self.request_quit();
                } else {
                    self.skip_playback();
                }
            }
        }
    }

    /// Esc key: finish playback first, then drop the draft.
    pub fn cancel(&mut self) {
        if !self.playback_idle() {
            self.skip_playback();
            return;
        }
        match self.controller.phase() {
            FlowPhase::Ended => self.request_quit(),
            FlowPhase::Streaming | FlowPhase::QuizLocked => {
                self.draft.clear();
                self.palette_cursor = 0;
                self.history.reset_navigation();
            }
            FlowPhase::Opening | FlowPhase::WaitContinue => {}
        }
    }

    fn submit_terminal(&mut self) {
        let line = take(&mut self.draft);
        self.history.reset_navigation();
        if line.trim().is_empty() {
            self.skip_playback();
            return;
        }
        self.history.push(HistoryLane::Commands, &line);
        self.controller.submit_terminal(&line);
    }

    fn submit_quiz_draft(&mut self) {
        if self.draft.trim_start().starts_with('/') {
            self.insert_selected();
            return;
        }

        let raw = take(&mut self.draft);
        self.history.reset_navigation();
        let recorded = if raw.trim().is_empty() {
            join_symbols(self.controller.pending())
        } else {
            raw.clone()
        };

        let submitted = if self.options.ascii_only {
            glyphs_for_ascii(&raw)
        } else {
            raw.clone()
        };
        match self.controller.submit_attempt(&submitted) {
            SubmitOutcome::Evaluated(_) => {
                self.history.push(HistoryLane::Attempts, &recorded);
            }
            SubmitOutcome::Rejected(_) => {
                // Keep typed text recallable so it can be corrected.
                self.history.push(HistoryLane::Attempts, &raw);
            }
            SubmitOutcome::Ignored => {}
        }
        self.palette_cursor = 0;
    }

    /// Symbols offered by the palette. A `/query` draft filters them.
    #[must_use]
    pub fn palette(&self) -> Vec<Symbol> {
        match self.palette_query() {
            Some(query) => Symbol::ALL
                .into_iter()
                .filter(|symbol| symbol.matches_query(query))
                .collect(),
            None => Symbol::ALL.to_vec(),
        }
    }

    fn palette_query(&self) -> Option<&str> {
        self.draft.trim_start().strip_prefix('/')
    }

    #[must_use]
    pub fn selected_symbol(&self) -> Option<Symbol> {
        let palette = self.palette();
        if palette.is_empty() {
            return None;
        }
        palette.get(self.palette_cursor % palette.len()).copied()
    }

    pub fn move_palette(&mut self, forward: bool) {
        if self.controller.phase() != FlowPhase::QuizLocked {
            return;
        }
        let len = self.palette().len();
        if len == 0 {
            return;
        }
        let cursor = self.palette_cursor % len;
        self.palette_cursor = if forward {
            (cursor + 1) % len
        } else {
            (cursor + len - 1) % len
        };
    }

    /// Push the highlighted palette symbol into the pending sequence.
    pub fn insert_selected(&mut self) {
        if self.controller.phase() != FlowPhase::QuizLocked {
            return;
        }
        let Some(symbol) = self.selected_symbol() else {
            let query = self.draft.trim().to_owned();
            self.controller
                .observer_mut()
                .notice(format!("[INPUT] no symbol matches `{query}`"), LogTone::Warn);
            return;
        };
        if self.controller.push_symbol(symbol) {
            if self.palette_query().is_some() {
                self.draft.clear();
                self.palette_cursor = 0;
            }
        } else {
            let required = self.controller.required_length();
            self.controller.observer_mut().notice(
                format!("[INPUT] sequence is full ({required} symbols)"),
                LogTone::Warn,
            );
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.accepts_typing() {
            return;
        }
        if c == ' ' && self.controller.phase() == FlowPhase::QuizLocked && self.draft.is_empty() {
            self.insert_selected();
            return;
        }
        if self.draft.chars().count() >= MAX_DRAFT_CHARS {
            return;
        }
        self.draft.push(c);
        self.palette_cursor = 0;
    }

    /// Pasted text lands in the draft as a single line.
    pub fn insert_text(&mut self, text: &str) {
        if !self.accepts_typing() {
            return;
        }
        for c in text.chars() {
            let c = if c.is_whitespace() { ' ' } else { c };
            if self.draft.chars().count() >= MAX_DRAFT_CHARS {
                break;
            }
            self.draft.push(c);
        }
        self.palette_cursor = 0;
    }

    /// Delete from the draft, or drop the last pending symbol once the draft
    /// is empty.
    pub fn backspace(&mut self) {
        if self.draft.pop().is_some() {
            self.palette_cursor = 0;
            return;
        }
        if self.controller.phase() == FlowPhase::QuizLocked {
            self.controller.pop_symbol();
        }
    }

    pub fn clear_pending(&mut self) {
        self.controller.clear_pending();
    }

    pub fn history_up(&mut self) {
        let Some(lane) = self.history_lane() else {
            return;
        };
        if let NavOutcome::Moved(text) = self.history.navigate_up(lane, &self.draft) {
            self.draft = text;
        }
    }

    pub fn history_down(&mut self) {
        let Some(lane) = self.history_lane() else {
            return;
        };
        if let NavOutcome::Moved(text) = self.history.navigate_down(lane) {
            self.draft = text;
        }
    }

    fn history_lane(&self) -> Option<HistoryLane> {
        match self.controller.phase() {
            FlowPhase::Streaming => Some(HistoryLane::Commands),
            FlowPhase::QuizLocked => Some(HistoryLane::Attempts),
            FlowPhase::Opening | FlowPhase::WaitContinue | FlowPhase::Ended => None,
        }
    }

    fn accepts_typing(&self) -> bool {
        matches!(
            self.controller.phase(),
            FlowPhase::Streaming | FlowPhase::QuizLocked
        )
    }
}

/// Rewrite ASCII stand-ins (`=>`, `~`, `^`, ...) to the glyphs the engine parses.
/// Tokens that are neither pass through so the engine can name them.
fn glyphs_for_ascii(raw: &str) -> String {
    raw.split_whitespace()
        .map(
            |token| match Symbol::ALL.into_iter().find(|symbol| symbol.ascii() == token) {
                Some(symbol) => symbol.glyph(),
                None => token,
            },
        )
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hyresis_engine::{FlowPhase, HyresisConfig, LogTone, Symbol, TimingConfig};
    use hyresis_types::ui::{ModalEffectKind, UiOptions};

    use super::GameApp;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> GameApp {
        let config = HyresisConfig::default();
        let timing = TimingConfig {
            typing_enabled: false,
            ..TimingConfig::default()
        };
        GameApp::new(config.settings().unwrap(), timing, UiOptions::default())
    }

    /// Skip whatever is playing and let the automatic transitions run.
    fn settle(app: &mut GameApp) {
        app.skip_playback();
        app.tick(FRAME);
    }

    fn quiz_app() -> GameApp {
        let mut app = app();
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::WaitContinue);
        app.skip_playback();
        app.confirm();
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::QuizLocked);
        app.tick(FRAME);
        app
    }

    fn type_str(app: &mut GameApp, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn opening_finishes_once_playback_is_idle() {
        let mut app = app();
        app.tick(FRAME);
        assert_eq!(app.phase(), FlowPhase::Opening);
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::WaitContinue);
    }

    #[test]
    fn enter_skips_before_it_continues() {
        let mut app = app();
        settle(&mut app);
        app.controller.observer_mut().notice("pending", LogTone::Muted);
        app.confirm();
        assert_eq!(app.phase(), FlowPhase::WaitContinue);
        app.confirm();
        assert_eq!(app.phase(), FlowPhase::Streaming);
    }

    #[test]
    fn quiz_opens_automatically_and_pops() {
        let app = quiz_app();
        assert_eq!(
            app.modal_effect().map(|effect| effect.kind()),
            Some(ModalEffectKind::PopScale)
        );
    }

    #[test]
    fn quiz_waits_for_continue_when_auto_open_is_off() {
        let config = HyresisConfig::default();
        let timing = TimingConfig {
            typing_enabled: false,
            auto_open_quiz: false,
            ..TimingConfig::default()
        };
        let mut app = GameApp::new(config.settings().unwrap(), timing, UiOptions::default());
        settle(&mut app);
        app.skip_playback();
        app.confirm();
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::Streaming);

        type_str(&mut app, "/c");
        app.confirm();
        assert_eq!(app.phase(), FlowPhase::QuizLocked);
    }

    #[test]
    fn palette_space_and_enter_submit_pending() {
        let mut app = quiz_app();
        app.move_palette(true);
        app.move_palette(true);
        assert_eq!(app.selected_symbol(), Some(Symbol::Implies));
        app.insert_char(' ');

        type_str(&mut app, "/not");
        assert_eq!(app.palette(), vec![Symbol::Not]);
        app.confirm();
        assert_eq!(app.controller().pending(), &[Symbol::Implies, Symbol::Not]);
        assert!(app.draft().is_empty());

        app.confirm();
        settle(&mut app);
        assert_eq!(app.controller().recovered(), 1);
        assert_eq!(app.controller().clause_index(), 1);
    }

    #[test]
    fn failed_attempt_shakes_and_is_recallable() {
        let mut app = quiz_app();
        app.insert_text("¬ ⇒");
        app.confirm();
        app.tick(FRAME);
        assert_eq!(
            app.modal_effect().map(|effect| effect.kind()),
            Some(ModalEffectKind::Shake)
        );

        app.history_up();
        assert_eq!(app.draft(), "¬ ⇒");
        app.history_down();
        assert_eq!(app.draft(), "");
    }

    #[test]
    fn reduced_motion_skips_effects() {
        let config = HyresisConfig::default();
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        let mut app = GameApp::new(config.settings().unwrap(), TimingConfig::default(), options);
        settle(&mut app);
        app.skip_playback();
        app.confirm();
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::QuizLocked);
        app.tick(FRAME);
        assert!(app.modal_effect().is_none());
    }

    #[test]
    fn backspace_pops_pending_when_draft_is_empty() {
        let mut app = quiz_app();
        app.insert_char(' ');
        assert_eq!(app.controller().pending().len(), 1);
        type_str(&mut app, "x");
        app.backspace();
        assert_eq!(app.controller().pending().len(), 1);
        app.backspace();
        assert!(app.controller().pending().is_empty());
    }

    #[test]
    fn full_sequence_refuses_more_symbols() {
        let mut app = quiz_app();
        app.insert_char(' ');
        app.insert_char(' ');
        app.insert_char(' ');
        assert_eq!(app.controller().pending().len(), 2);
        settle(&mut app);
        assert!(
            app.log()
                .lines()
                .any(|line| line.text == "[INPUT] sequence is full (2 symbols)")
        );
    }

    #[test]
    fn ascii_mode_accepts_displayed_stand_ins() {
        let config = HyresisConfig::default();
        let timing = TimingConfig {
            typing_enabled: false,
            ..TimingConfig::default()
        };
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let mut app = GameApp::new(config.settings().unwrap(), timing, options);
        settle(&mut app);
        app.skip_playback();
        app.confirm();
        settle(&mut app);
        assert_eq!(app.phase(), FlowPhase::QuizLocked);

        type_str(&mut app, "=> ~");
        app.confirm();
        assert_eq!(app.controller().recovered(), 1);
    }

    #[test]
    fn ascii_rewrite_leaves_unknown_tokens() {
        assert_eq!(super::glyphs_for_ascii("=>  ~ ^ foo"), "⇒ ¬ ∧ foo");
    }
}
