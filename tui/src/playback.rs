//! Tick-driven narrative playback.
//!
//! Lines are queued with the pause that follows them and revealed one
//! grapheme at a time as frames advance the clock. Nothing here sleeps;
//! [`Playback::skip`] flushes everything instantly.

use std::{collections::VecDeque, time::Duration};

use unicode_segmentation::UnicodeSegmentation;

use hyresis_engine::{LogTone, ScriptLine};

const MAX_LOG_LINES: usize = 600;

/// A revealed (possibly still typing) log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub tone: LogTone,
}

#[derive(Debug)]
struct Typing {
    graphemes: Vec<String>,
    shown: usize,
    pause: Duration,
}

impl Typing {
    fn done(&self) -> bool {
        self.shown >= self.graphemes.len()
    }

    fn visible(&self) -> String {
        self.graphemes[..self.shown].concat()
    }
}

#[derive(Debug)]
pub struct Playback {
    queue: VecDeque<ScriptLine>,
    lines: VecDeque<LogLine>,
    typing: Option<Typing>,
    credit: Duration,
    char_delay: Duration,
    typing_enabled: bool,
}

impl Playback {
    #[must_use]
    pub fn new(typing_enabled: bool, char_delay: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            lines: VecDeque::new(),
            typing: None,
            credit: Duration::ZERO,
            char_delay,
            typing_enabled,
        }
    }

    pub fn push(&mut self, line: ScriptLine) {
        self.queue.push_back(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = ScriptLine>) {
        self.queue.extend(lines);
    }

    /// Nothing typing and nothing queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.typing.is_none() && self.queue.is_empty()
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &LogLine> + DoubleEndedIterator {
        self.lines.iter()
    }

    /// Reveal whatever `delta` of wall time pays for.
    pub fn advance(&mut self, delta: Duration) {
        self.credit = self.credit.saturating_add(delta);
        loop {
            if let Some(typing) = self.typing.as_mut() {
                while !typing.done() {
                    if !self.typing_enabled || self.char_delay.is_zero() {
                        typing.shown = typing.graphemes.len();
                        break;
                    }
                    if self.credit < self.char_delay {
                        break;
                    }
                    self.credit -= self.char_delay;
                    typing.shown += 1;
                }
                if let Some(last) = self.lines.back_mut() {
                    last.text = typing.visible();
                }
                if !typing.done() || self.credit < typing.pause {
                    return;
                }
                self.credit -= typing.pause;
                self.typing = None;
            } else if let Some(next) = self.queue.pop_front() {
                self.start(next);
            } else {
                self.credit = Duration::ZERO;
                return;
            }
        }
    }

    /// Reveal every queued line immediately.
    pub fn skip(&mut self) {
        if let Some(typing) = self.typing.take()
            && let Some(last) = self.lines.back_mut()
        {
            last.text = typing.graphemes.concat();
        }
        while let Some(line) = self.queue.pop_front() {
            self.append(LogLine {
                text: line.text,
                tone: line.tone,
            });
        }
        self.credit = Duration::ZERO;
    }

    fn start(&mut self, line: ScriptLine) {
        let graphemes: Vec<String> = line.text.graphemes(true).map(str::to_owned).collect();
        self.append(LogLine {
            text: String::new(),
            tone: line.tone,
        });
        self.typing = Some(Typing {
            graphemes,
            shown: 0,
            pause: Duration::from_millis(line.delay_ms),
        });
    }

    fn append(&mut self, line: LogLine) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_LOG_LINES {
            self.lines.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hyresis_engine::{LogTone, ScriptLine};

    use super::Playback;

    fn texts(playback: &Playback) -> Vec<String> {
        playback.lines().map(|line| line.text.clone()).collect()
    }

    #[test]
    fn types_one_grapheme_per_char_delay() {
        let mut playback = Playback::new(true, Duration::from_millis(10));
        playback.push(ScriptLine::new("⇒ ¬", LogTone::Emphasis, 0));

        playback.advance(Duration::from_millis(10));
        assert_eq!(texts(&playback), vec!["⇒"]);
        playback.advance(Duration::from_millis(15));
        assert_eq!(texts(&playback), vec!["⇒ "]);
        playback.advance(Duration::from_millis(5));
        assert_eq!(texts(&playback), vec!["⇒ ¬"]);
        assert!(playback.is_idle());
    }

    #[test]
    fn pause_holds_the_next_line() {
        let mut playback = Playback::new(false, Duration::ZERO);
        playback.push(ScriptLine::new("first", LogTone::Muted, 100));
        playback.push(ScriptLine::new("second", LogTone::Muted, 0));

        playback.advance(Duration::from_millis(50));
        assert_eq!(texts(&playback), vec!["first"]);
        assert!(!playback.is_idle());

        playback.advance(Duration::from_millis(50));
        assert_eq!(texts(&playback), vec!["first", "second"]);
        assert!(playback.is_idle());
    }

    #[test]
    fn skip_flushes_everything() {
        let mut playback = Playback::new(true, Duration::from_millis(50));
        playback.push(ScriptLine::new("connecting...", LogTone::Muted, 400));
        playback.push(ScriptLine::new("connected", LogTone::Success, 400));
        playback.advance(Duration::from_millis(60));

        playback.skip();
        assert_eq!(texts(&playback), vec!["connecting...", "connected"]);
        assert!(playback.is_idle());
    }

    #[test]
    fn idle_time_does_not_bank_credit() {
        let mut playback = Playback::new(true, Duration::from_millis(10));
        playback.advance(Duration::from_secs(5));
        playback.push(ScriptLine::new("abc", LogTone::Muted, 0));
        playback.advance(Duration::from_millis(10));
        assert_eq!(texts(&playback), vec!["a"]);
    }
}
