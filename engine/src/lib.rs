//! Core engine for HYRESIS - evaluation and puzzle-flow state machine.
//!
//! This crate contains the game controller without TUI dependencies. A
//! presenter drives it through [`PuzzleController`] and listens through
//! [`GameObserver`].

mod commands;
mod config;
pub mod content;
mod controller;
mod evaluator;
mod flow;
mod history;
mod intel;
mod observer;
mod slot_lock;
mod trace;

pub use commands::{CommandOutput, CommandSpec, command_help_summary, command_specs, fragment_label};
pub use config::{
    AppConfig, CONFIG_PATH_ENV, ConfigError, GameConfig, GameSettings, HyresisConfig,
    TimingConfig, config_path,
};
pub use controller::{AttemptReport, PuzzleController, SubmitOutcome};
pub use evaluator::evaluate;
pub use flow::{FlowTrigger, next_phase};
pub use history::{AttemptHistory, AttemptRecord};
pub use intel::SymbolIntel;
pub use observer::{GameEvent, GameObserver};
pub use slot_lock::{SlotLockError, SlotLocks};
pub use trace::TracePolicy;

// Re-export domain types so presenters depend on one crate.
pub use hyresis_types::{
    Alignment, Clause, ClauseError, ClauseSet, Evaluation, FlowPhase, InputError, InputErrorKind,
    LengthBounds, LogTone, ScriptLine, SlotStatus, Symbol, SymbolGroup, TraceBand, TraceLevel,
    join_symbols,
};
