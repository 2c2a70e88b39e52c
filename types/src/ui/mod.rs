//! UI state types for the presentation layer.
//!
//! Pure data types with no IO and no ratatui dependency.

mod animation;
mod history;
mod modal;

pub use animation::AnimPhase;
pub use history::{HistoryLane, InputHistory, NavOutcome};
pub use modal::{ModalEffect, ModalEffectKind};

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}
