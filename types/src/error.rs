//! Player input validation errors.

use thiserror::Error;

use crate::LengthBounds;

/// Why a submission was rejected before evaluation.
///
/// All variants are recoverable: the pending input is cleared, the phase is
/// unchanged, and the player may resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input is empty")]
    EmptyInput,
    #[error("symbol `{token}` is not allowed")]
    InvalidSymbol { token: String },
    #[error("this clause requires a sequence of exactly {required} symbols (received {received})")]
    LengthMismatch {
        required: usize,
        received: usize,
        /// Set when the global length bounds were violated as well.
        bounds: Option<LengthBounds>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputErrorKind {
    EmptyInput,
    InvalidSymbol,
    LengthMismatch,
}

impl InputErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InputErrorKind::EmptyInput => "EMPTY_INPUT",
            InputErrorKind::InvalidSymbol => "INVALID_SYMBOL",
            InputErrorKind::LengthMismatch => "LENGTH_MISMATCH",
        }
    }
}

impl InputError {
    #[must_use]
    pub const fn kind(&self) -> InputErrorKind {
        match self {
            InputError::EmptyInput => InputErrorKind::EmptyInput,
            InputError::InvalidSymbol { .. } => InputErrorKind::InvalidSymbol,
            InputError::LengthMismatch { .. } => InputErrorKind::LengthMismatch,
        }
    }

    /// Extra guidance line shown under the error, if any.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            InputError::EmptyInput => None,
            InputError::InvalidSymbol { .. } => Some(format!(
                "allowed symbols: {}",
                crate::Symbol::ALL
                    .iter()
                    .map(|symbol| symbol.glyph())
                    .collect::<Vec<_>>()
                    .join(" ")
            )),
            InputError::LengthMismatch {
                bounds: Some(bounds),
                ..
            } => Some(format!("allowed length: {} ~ {}", bounds.min, bounds.max)),
            InputError::LengthMismatch { bounds: None, .. } => None,
        }
    }
}
