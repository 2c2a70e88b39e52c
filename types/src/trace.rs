//! Trace level: the tension meter that rises on failure and falls on success.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Percentage in `[0, 99]`. Every adjustment saturates at the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceLevel(u8);

impl TraceLevel {
    pub const MAX: u8 = 99;

    /// Out-of-range values are clamped to `MAX`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn raised(self, amount: u8) -> Self {
        Self::new(self.0.saturating_add(amount))
    }

    #[must_use]
    pub const fn lowered(self, amount: u8) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Coarse risk band for presentation colouring.
    #[must_use]
    pub const fn band(self) -> TraceBand {
        match self.0 {
            0..=29 => TraceBand::Low,
            30..=69 => TraceBand::Elevated,
            _ => TraceBand::Critical,
        }
    }
}

impl Default for TraceLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceBand {
    Low,
    Elevated,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::{TraceBand, TraceLevel};

    #[test]
    fn raise_never_exceeds_max() {
        let mut level = TraceLevel::new(90);
        for _ in 0..50 {
            level = level.raised(9);
            assert!(level.value() <= TraceLevel::MAX);
        }
        assert_eq!(level.value(), 99);
    }

    #[test]
    fn lower_never_goes_below_zero() {
        let mut level = TraceLevel::new(20);
        for _ in 0..10 {
            level = level.lowered(14);
        }
        assert_eq!(level.value(), 0);
    }

    #[test]
    fn new_clamps() {
        assert_eq!(TraceLevel::new(250).value(), 99);
        assert_eq!(TraceLevel::default().value(), 2);
    }

    #[test]
    fn bands() {
        assert_eq!(TraceLevel::new(5).band(), TraceBand::Low);
        assert_eq!(TraceLevel::new(45).band(), TraceBand::Elevated);
        assert_eq!(TraceLevel::new(99).band(), TraceBand::Critical);
        assert_eq!(TraceLevel::new(70).to_string(), "70%");
    }
}
