//! Input history for attempt and command recall.
//!
//! Two independent ring buffers: symbol sequences submitted to the mission
//! overlay, and free-text lines typed at the terminal. Both support Up/Down
//! navigation with the in-progress draft stashed while browsing.

use std::collections::VecDeque;
use std::mem::take;

const MAX_ATTEMPT_HISTORY: usize = 50;

const MAX_COMMAND_HISTORY: usize = 30;

/// Which input surface a history entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLane {
    Attempts,
    Commands,
}

/// `Idle` means the user is editing a fresh draft.
/// `Active` means the user is browsing history entries.
#[derive(Debug, Default, Clone)]
enum NavState {
    #[default]
    Idle,
    Active {
        index: usize,
        stash: String,
    },
}

/// Result of a navigation attempt: either we moved to an entry, or we're
/// already at the boundary (top of history, or not navigating).
#[derive(Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(String),
    AtBoundary,
}

#[derive(Debug, Clone)]
struct Lane {
    entries: VecDeque<String>,
    cap: usize,
    nav: NavState,
}

impl Lane {
    fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
            nav: NavState::Idle,
        }
    }

    fn push(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.entries.back().is_some_and(|last| last == text) {
            return;
        }
        self.entries.push_back(text.to_owned());
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    fn up(&mut self, current: &str) -> NavOutcome {
        match &mut self.nav {
            NavState::Idle => match self.entries.len().checked_sub(1) {
                None => NavOutcome::AtBoundary,
                Some(last) => {
                    self.nav = NavState::Active {
                        index: last,
                        stash: current.to_owned(),
                    };
                    NavOutcome::Moved(self.entries[last].clone())
                }
            },
            NavState::Active { index: 0, .. } => NavOutcome::AtBoundary,
            NavState::Active { index, .. } => {
                *index -= 1;
                NavOutcome::Moved(self.entries[*index].clone())
            }
        }
    }

    fn down(&mut self) -> NavOutcome {
        let current = match &self.nav {
            NavState::Idle => return NavOutcome::AtBoundary,
            NavState::Active { index, .. } => *index,
        };

        if current + 1 >= self.entries.len() {
            let NavState::Active { stash, .. } = take(&mut self.nav) else {
                return NavOutcome::AtBoundary;
            };
            NavOutcome::Moved(stash)
        } else {
            if let NavState::Active { index, .. } = &mut self.nav {
                *index = current + 1;
            }
            NavOutcome::Moved(self.entries[current + 1].clone())
        }
    }
}

/// Input history for the attempt and command lanes.
///
/// # Navigation Behavior
///
/// When the user presses Up:
/// 1. If not navigating, stash the current draft and show the most recent entry
/// 2. If already navigating, show the next older entry
///
/// When the user presses Down:
/// 1. If at the newest entry, restore the stashed draft
/// 2. Otherwise, show the next newer entry
///
/// Navigation is reset after every submission.
#[derive(Debug, Clone)]
pub struct InputHistory {
    attempts: Lane,
    commands: Lane,
}

impl Default for InputHistory {
    fn default() -> Self {
        Self {
            attempts: Lane::new(MAX_ATTEMPT_HISTORY),
            commands: Lane::new(MAX_COMMAND_HISTORY),
        }
    }
}

impl InputHistory {
    fn lane_mut(&mut self, lane: HistoryLane) -> &mut Lane {
        match lane {
            HistoryLane::Attempts => &mut self.attempts,
            HistoryLane::Commands => &mut self.commands,
        }
    }

    /// Record a submission. Blank lines and repeats of the latest entry are
    /// ignored; the oldest entry is evicted past the lane's capacity.
    pub fn push(&mut self, lane: HistoryLane, text: &str) {
        self.lane_mut(lane).push(text);
    }

    /// Navigate to the previous (older) entry, stashing `current` on the
    /// first step.
    pub fn navigate_up(&mut self, lane: HistoryLane, current: &str) -> NavOutcome {
        self.lane_mut(lane).up(current)
    }

    /// Navigate to the next (newer) entry, restoring the stash past the end.
    pub fn navigate_down(&mut self, lane: HistoryLane) -> NavOutcome {
        self.lane_mut(lane).down()
    }

    pub fn reset_navigation(&mut self) {
        self.attempts.nav = NavState::Idle;
        self.commands.nav = NavState::Idle;
    }

    #[must_use]
    pub fn len(&self, lane: HistoryLane) -> usize {
        match lane {
            HistoryLane::Attempts => self.attempts.entries.len(),
            HistoryLane::Commands => self.commands.entries.len(),
        }
    }
}
