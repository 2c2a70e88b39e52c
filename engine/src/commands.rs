//! Free-text terminal commands, accepted while the log is streaming.

use hyresis_types::{Clause, LogTone, SymbolGroup, to_roman};

use crate::{GameObserver, PuzzleController};

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub palette_label: &'static str,
    pub help_label: &'static str,
    pub description: &'static str,
    pub show_in_help: bool,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        palette_label: "symbols",
        help_label: "symbols",
        description: "List the symbol alphabet",
        show_in_help: true,
    },
    CommandSpec {
        palette_label: "status",
        help_label: "status",
        description: "Show reconstruction progress",
        show_in_help: true,
    },
    CommandSpec {
        palette_label: "history",
        help_label: "history",
        description: "Show recent attempts",
        show_in_help: true,
    },
    CommandSpec {
        palette_label: "c, continue",
        help_label: "c(ontinue)",
        description: "Open the current clause",
        show_in_help: true,
    },
    CommandSpec {
        palette_label: "help",
        help_label: "help",
        description: "Show available commands",
        show_in_help: false,
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}

#[must_use]
pub fn command_help_summary() -> String {
    let labels: Vec<&str> = COMMAND_SPECS
        .iter()
        .filter(|spec| spec.show_in_help)
        .map(|spec| spec.help_label)
        .collect();
    format!("Commands: /{}", labels.join(", /"))
}

/// Parsed terminal command.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Help,
    Symbols,
    Status,
    History,
    Continue,
    Unknown(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    /// Parse a raw line. A leading `/` is optional.
    pub(crate) fn parse(raw: &'a str) -> Self {
        let parts: Vec<&str> = raw.split_whitespace().collect();

        match parts.first().map(|word| word.strip_prefix('/').unwrap_or(word)) {
            Some("help" | "?") => Command::Help,
            Some("symbols" | "sym") => Command::Symbols,
            Some("status") => Command::Status,
            Some("history" | "hist") => Command::History,
            Some("continue" | "c") => Command::Continue,
            Some(_) => Command::Unknown(raw.trim()),
            None => Command::Empty,
        }
    }
}

/// Lines a command printed to the terminal log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub input: String,
    pub lines: Vec<String>,
    pub tone: LogTone,
}

impl CommandOutput {
    fn new(input: &str, lines: Vec<String>) -> Self {
        Self {
            input: input.trim().to_owned(),
            lines,
            tone: LogTone::Muted,
        }
    }
}

/// `Fragments: [ ■ ■ □ ]`
#[must_use]
pub fn fragment_label(total: usize, progress: usize) -> String {
    let cells: String = (0..total)
        .map(|index| if index < progress { " ■" } else { " □" })
        .collect();
    format!("Fragments: [{cells} ]")
}

impl<O: GameObserver> PuzzleController<O> {
    /// Run a terminal command. Returns `None` outside the streaming phase or
    /// for a blank line.
    pub fn submit_terminal(&mut self, raw: &str) -> Option<CommandOutput> {
        if !self.phase().accepts_commands() {
            tracing::debug!(phase = %self.phase(), "Terminal input ignored");
            return None;
        }

        let output = match Command::parse(raw) {
            Command::Empty => return None,
            Command::Help => {
                let mut lines = vec![command_help_summary()];
                lines.extend(
                    COMMAND_SPECS
                        .iter()
                        .map(|spec| format!("  {:<14} {}", spec.palette_label, spec.description)),
                );
                CommandOutput::new(raw, lines)
            }
            Command::Symbols => CommandOutput::new(raw, symbol_table()),
            Command::Status => CommandOutput::new(raw, self.status_lines()),
            Command::History => CommandOutput::new(raw, self.history_lines()),
            Command::Continue => {
                CommandOutput::new(raw, vec!["Resuming reconstruction.".to_owned()])
            }
            Command::Unknown(text) => CommandOutput {
                tone: LogTone::Warn,
                ..CommandOutput::new(
                    raw,
                    vec![format!("Unknown command `{text}`. Type help for the list.")],
                )
            },
        };

        self.observer_mut().on_command(&output);
        if matches!(Command::parse(raw), Command::Continue) {
            self.request_continue();
        }
        Some(output)
    }

    fn status_lines(&self) -> Vec<String> {
        let current = self.current_clause().map_or_else(
            || "Current: --".to_owned(),
            |clause| format!("Current: Clause {} ({})", clause.roman_id(), clause.name),
        );
        let fragment_total = self.current_clause().map_or(0, Clause::fragment_total);
        vec![
            "Integrity: COMPROMISED".to_owned(),
            format!("Clauses: {} / {}", self.recovered(), self.clauses().len()),
            current,
            fragment_label(fragment_total, self.fragment_progress()),
            format!("Trace: {}", self.trace()),
            format!("Phase: {}", self.phase()),
        ]
    }

    fn history_lines(&self) -> Vec<String> {
        if self.history().is_empty() {
            return vec!["No attempts recorded.".to_owned()];
        }
        self.history()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                format!(
                    "{:>2}. [{}] {}",
                    index + 1,
                    to_roman(record.clause_id),
                    record.summary()
                )
            })
            .collect()
    }
}

fn symbol_table() -> Vec<String> {
    SymbolGroup::ALL
        .iter()
        .map(|group| {
            let entries: Vec<String> = group
                .symbols()
                .map(|symbol| format!("{} {} ({})", symbol.glyph(), symbol.command(), symbol.meaning()))
                .collect();
            format!("{} {}", group.label(), entries.join("  "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Command, command_help_summary, fragment_label};

    #[test]
    fn parse_with_and_without_slash() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("  status  "), Command::Status);
        assert_eq!(Command::parse("/symbols"), Command::Symbols);
        assert_eq!(Command::parse("hist"), Command::History);
        assert_eq!(Command::parse("c"), Command::Continue);
        assert_eq!(Command::parse("/continue now"), Command::Continue);
    }

    #[test]
    fn parse_empty_command() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(Command::parse("⇒ ¬"), Command::Unknown("⇒ ¬"));
        assert_eq!(Command::parse("HELP"), Command::Unknown("HELP"));
    }

    #[test]
    fn help_summary_hides_help_itself() {
        let summary = command_help_summary();
        assert!(summary.starts_with("Commands: /symbols"));
        assert!(!summary.contains("help"));
    }

    #[test]
    fn fragment_label_fills_progress() {
        assert_eq!(fragment_label(3, 1), "Fragments: [ ■ □ □ ]");
        assert_eq!(fragment_label(0, 0), "Fragments: [ ]");
    }
}
