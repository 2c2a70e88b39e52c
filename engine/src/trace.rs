//! Trace adjustment policy.

use serde::Deserialize;

use hyresis_types::{Alignment, Evaluation, InputError, TraceLevel};

/// Trace constants, loaded from the `[trace]` config section.
///
/// ```toml
/// [trace]
/// initial = 2
/// success_relief = 14
/// strong_rise = 2
/// weak_rise = 5
/// miss_rise = 9
/// empty_penalty = 2
/// invalid_penalty = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracePolicy {
    pub initial: u8,
    /// Drop on a successful evaluation. The clause-completion handoff that
    /// follows applies nothing further.
    pub success_relief: u8,
    /// Rise when two or more symbols matched (exact or misplaced).
    pub strong_rise: u8,
    /// Rise when some symbol matched, below the strong threshold.
    pub weak_rise: u8,
    /// Rise when nothing matched.
    pub miss_rise: u8,
    pub empty_penalty: u8,
    /// Applied to invalid-symbol and length-mismatch rejections.
    pub invalid_penalty: u8,
}

impl Default for TracePolicy {
    fn default() -> Self {
        Self {
            initial: 2,
            success_relief: 14,
            strong_rise: 2,
            weak_rise: 5,
            miss_rise: 9,
            empty_penalty: 2,
            invalid_penalty: 3,
        }
    }
}

impl TracePolicy {
    #[must_use]
    pub fn initial_level(&self) -> TraceLevel {
        TraceLevel::new(self.initial)
    }

    #[must_use]
    pub fn after_evaluation(&self, level: TraceLevel, evaluation: &Evaluation) -> TraceLevel {
        match evaluation.alignment() {
            Alignment::Complete => level.lowered(self.success_relief),
            Alignment::Partial => level.raised(self.strong_rise),
            Alignment::Weak => level.raised(self.weak_rise),
            Alignment::Unaligned => level.raised(self.miss_rise),
        }
    }

    #[must_use]
    pub fn after_rejection(&self, level: TraceLevel, error: &InputError) -> TraceLevel {
        match error {
            InputError::EmptyInput => level.raised(self.empty_penalty),
            InputError::InvalidSymbol { .. } | InputError::LengthMismatch { .. } => {
                level.raised(self.invalid_penalty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TracePolicy;
    use hyresis_types::{Evaluation, InputError, SlotStatus, TraceLevel};

    use SlotStatus::{Absent, Correct, Present};

    fn eval(statuses: &[SlotStatus]) -> Evaluation {
        Evaluation::from_statuses(statuses.to_vec())
    }

    #[test]
    fn evaluation_deltas() {
        let policy = TracePolicy::default();
        let start = TraceLevel::new(50);

        assert_eq!(
            policy.after_evaluation(start, &eval(&[Correct, Correct])).value(),
            36
        );
        assert_eq!(
            policy
                .after_evaluation(start, &eval(&[Present, Present, Absent]))
                .value(),
            52
        );
        assert_eq!(
            policy
                .after_evaluation(start, &eval(&[Correct, Absent, Absent]))
                .value(),
            55
        );
        assert_eq!(
            policy
                .after_evaluation(start, &eval(&[Absent, Absent, Absent]))
                .value(),
            59
        );
    }

    #[test]
    fn rejection_penalties() {
        let policy = TracePolicy::default();
        let start = TraceLevel::new(10);
        assert_eq!(
            policy.after_rejection(start, &InputError::EmptyInput).value(),
            12
        );
        let mismatch = InputError::LengthMismatch {
            required: 2,
            received: 3,
            bounds: None,
        };
        assert_eq!(policy.after_rejection(start, &mismatch).value(), 13);
    }

    #[test]
    fn repeated_misses_clamp_at_max() {
        let policy = TracePolicy::default();
        let miss = eval(&[Absent, Absent]);
        let mut level = policy.initial_level();
        for _ in 0..40 {
            level = policy.after_evaluation(level, &miss);
        }
        assert_eq!(level.value(), TraceLevel::MAX);
    }

    #[test]
    fn repeated_success_clamps_at_zero() {
        let policy = TracePolicy::default();
        let hit = eval(&[Correct]);
        let mut level = TraceLevel::new(30);
        for _ in 0..10 {
            level = policy.after_evaluation(level, &hit);
        }
        assert_eq!(level.value(), 0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let policy: TracePolicy = toml::from_str("miss_rise = 20").unwrap();
        assert_eq!(policy.miss_rise, 20);
        assert_eq!(policy.success_relief, 14);
    }
}
