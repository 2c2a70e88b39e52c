//! Narrative log lines and their tones.

use serde::{Deserialize, Serialize};

/// Visual tone of a terminal log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTone {
    #[default]
    Muted,
    Emphasis,
    Success,
    Warn,
    Alert,
}

/// One line of scripted narrative with the pause that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub text: String,
    #[serde(default)]
    pub tone: LogTone,
    #[serde(default)]
    pub delay_ms: u64,
}

impl ScriptLine {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: LogTone, delay_ms: u64) -> Self {
        Self {
            text: text.into(),
            tone,
            delay_ms,
        }
    }
}
