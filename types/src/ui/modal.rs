//! Mission overlay animation effects.

use std::time::Duration;

use super::animation::{AnimPhase, EffectTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEffectKind {
    /// Overlay opening for a new clause.
    PopScale,
    /// Rejected or failed attempt.
    Shake,
}

#[derive(Debug, Clone)]
pub struct ModalEffect {
    kind: ModalEffectKind,
    timer: EffectTimer,
}

impl ModalEffect {
    #[must_use]
    pub fn pop_scale(duration: Duration) -> Self {
        Self {
            kind: ModalEffectKind::PopScale,
            timer: EffectTimer::new(duration),
        }
    }

    #[must_use]
    pub fn shake(duration: Duration) -> Self {
        Self {
            kind: ModalEffectKind::Shake,
            timer: EffectTimer::new(duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.timer.phase()
    }

    /// Normalized progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.phase() {
            AnimPhase::Running { progress } => progress,
            AnimPhase::Completed => 1.0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ModalEffectKind {
        self.kind
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase(), AnimPhase::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimPhase, ModalEffect, ModalEffectKind};
    use std::time::Duration;

    #[test]
    fn pop_scale_initial_state() {
        let effect = ModalEffect::pop_scale(Duration::from_millis(200));
        assert_eq!(effect.kind(), ModalEffectKind::PopScale);
        assert!(matches!(effect.phase(), AnimPhase::Running { progress } if progress < 0.1));
    }

    #[test]
    fn shake_initial_state() {
        let effect = ModalEffect::shake(Duration::from_millis(250));
        assert_eq!(effect.kind(), ModalEffectKind::Shake);
        assert!(matches!(effect.phase(), AnimPhase::Running { .. }));
    }

    #[test]
    fn completed_after_duration() {
        let mut effect = ModalEffect::shake(Duration::from_millis(100));
        effect.advance(Duration::from_millis(60));
        assert!(!effect.is_finished());
        effect.advance(Duration::from_millis(60));
        assert!(effect.is_finished());
    }

    #[test]
    fn zero_duration_immediately_completed() {
        let effect = ModalEffect::pop_scale(Duration::ZERO);
        assert!(matches!(effect.phase(), AnimPhase::Completed));
    }
}
