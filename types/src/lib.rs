//! Core domain types for HYRESIS.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod clause;
mod error;
mod evaluation;
mod narrative;
mod phase;
mod symbol;
mod trace;
pub mod ui;

pub use clause::{Clause, ClauseError, ClauseSet, DEFAULT_SLOT_TOKEN, LengthBounds, to_roman};
pub use error::{InputError, InputErrorKind};
pub use evaluation::{Alignment, Evaluation, SlotStatus};
pub use narrative::{LogTone, ScriptLine};
pub use phase::FlowPhase;
pub use symbol::{Symbol, SymbolGroup, SymbolParseError, join_symbols};
pub use trace::{TraceBand, TraceLevel};
