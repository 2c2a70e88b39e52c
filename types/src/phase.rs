//! Top-level game progression phase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which stage of the game is active.
///
/// A single value owned by the controller; it decides which inputs are
/// accepted:
///
/// ```text
/// Opening ──finish──> WaitContinue ──continue──> Streaming ──continue──> QuizLocked
///                                                   ^                        │
///                                                   └──── clause solved ─────┘
///                                  (no clause left) ──────────────────────> Ended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowPhase {
    /// Scripted opening narrative is playing. Input disabled.
    #[default]
    Opening,
    /// Opening finished; waiting for an explicit continue.
    WaitContinue,
    /// Between clauses. Free-text terminal commands only.
    Streaming,
    /// The current clause is open for puzzle attempts.
    QuizLocked,
    /// Terminal. All input disabled.
    Ended,
}

impl FlowPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlowPhase::Opening => "OPENING",
            FlowPhase::WaitContinue => "WAIT_CONTINUE",
            FlowPhase::Streaming => "STREAMING",
            FlowPhase::QuizLocked => "QUIZ_LOCKED",
            FlowPhase::Ended => "ENDED",
        }
    }

    /// Puzzle attempts are evaluated only while a clause is locked open.
    #[must_use]
    pub const fn accepts_attempts(self) -> bool {
        matches!(self, FlowPhase::QuizLocked)
    }

    /// Free-text terminal commands are the streaming phase's only input.
    #[must_use]
    pub const fn accepts_commands(self) -> bool {
        matches!(self, FlowPhase::Streaming)
    }

    #[must_use]
    pub const fn accepts_continue(self) -> bool {
        matches!(self, FlowPhase::WaitContinue | FlowPhase::Streaming)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, FlowPhase::Ended)
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
