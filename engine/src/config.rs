use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use toml::de::Error as TomlError;

use hyresis_types::{Clause, ClauseError, ClauseSet, LengthBounds, ui::UiOptions};

use crate::{content, trace::TracePolicy};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "HYRESIS_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HyresisConfig {
    pub game: GameConfig,
    pub trace: TracePolicy,
    pub timing: TimingConfig,
    pub app: AppConfig,
    /// Replaces the built-in clause set when present.
    pub clauses: Option<Vec<Clause>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: TomlError,
    },
    #[error("invalid length bounds: min {min} must be at least 1 and not exceed max {max}")]
    InvalidBounds { min: usize, max: usize },
    #[error("invalid clause set: {0}")]
    Clauses(#[from] ClauseError),
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::InvalidBounds { .. } | ConfigError::Clauses(_) => None,
        }
    }
}

/// ```toml
/// [game]
/// min_length = 3
/// max_length = 5
/// history_limit = 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_length: usize,
    pub max_length: usize,
    /// Evaluated attempts kept for the `history` command.
    pub history_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        let bounds = LengthBounds::default();
        Self {
            min_length: bounds.min,
            max_length: bounds.max,
            history_limit: 8,
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> Result<LengthBounds, ConfigError> {
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(ConfigError::InvalidBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(LengthBounds::new(self.min_length, self.max_length))
    }
}

/// Narrative pacing for the terminal log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub line_delay_ms: u64,
    /// Pause between a restored clause and the next announcement.
    pub next_clause_delay_ms: u64,
    pub typing_enabled: bool,
    pub typing_char_delay_ms: u64,
    /// Open the mission overlay as soon as a clause is announced.
    pub auto_open_quiz: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            line_delay_ms: 450,
            next_clause_delay_ms: 800,
            typing_enabled: true,
            typing_char_delay_ms: 18,
            auto_open_quiz: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Use ASCII stand-ins for symbol glyphs and borders.
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    pub high_contrast: bool,
    /// Disable typing animation and modal motion effects.
    pub reduced_motion: bool,
}

impl AppConfig {
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        UiOptions {
            ascii_only: self.ascii_only,
            high_contrast: self.high_contrast,
            reduced_motion: self.reduced_motion,
        }
    }
}

/// Everything the controller needs, validated.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub clauses: ClauseSet,
    pub trace: TracePolicy,
    pub history_limit: usize,
}

impl HyresisConfig {
    /// Load the config from [`config_path`]. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Validate the game and clause sections into controller settings.
    pub fn settings(&self) -> Result<GameSettings, ConfigError> {
        let bounds = self.game.bounds()?;
        let clauses = match &self.clauses {
            Some(custom) => {
                tracing::info!(count = custom.len(), "Using clauses from config");
                custom.clone()
            }
            None => content::default_clauses(),
        };
        Ok(GameSettings {
            clauses: ClauseSet::new(clauses, bounds)?,
            trace: self.trace,
            history_limit: self.game.history_limit,
        })
    }
}

/// `$HYRESIS_CONFIG` when set, otherwise `~/.hyresis/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(custom) = env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(custom));
    }
    dirs::home_dir().map(|home| home.join(".hyresis").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig, HyresisConfig};
    use hyresis_types::Symbol;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = HyresisConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = write_config("");
        let config = HyresisConfig::load_from(file.path()).unwrap().unwrap();
        assert_eq!(config.game, GameConfig::default());
        assert!(config.timing.typing_enabled);
        assert!(config.timing.auto_open_quiz);
        assert_eq!(config.trace.success_relief, 14);

        let settings = config.settings().unwrap();
        assert_eq!(settings.clauses.len(), 5);
        assert_eq!(settings.history_limit, 8);
    }

    #[test]
    fn sections_override_defaults() {
        let file = write_config(
            r"
[game]
history_limit = 3

[trace]
initial = 40
miss_rise = 11

[timing]
typing_enabled = false

[app]
ascii_only = true
",
        );
        let config = HyresisConfig::load_from(file.path()).unwrap().unwrap();
        assert_eq!(config.game.history_limit, 3);
        assert_eq!(config.game.min_length, 3);
        assert_eq!(config.trace.initial, 40);
        assert_eq!(config.trace.miss_rise, 11);
        assert_eq!(config.trace.weak_rise, 5);
        assert!(!config.timing.typing_enabled);
        assert_eq!(config.timing.line_delay_ms, 450);
        assert!(config.app.ui_options().ascii_only);
    }

    #[test]
    fn custom_clauses_replace_built_ins() {
        let file = write_config(
            r#"
[[clauses]]
id = 1
name = "Only"
answer = ["∃", "⇒", "¬"]
"#,
        );
        let config = HyresisConfig::load_from(file.path()).unwrap().unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.clauses.len(), 1);
        let clause = settings.clauses.get(0).unwrap();
        assert_eq!(clause.answer, vec![Symbol::Exists, Symbol::Implies, Symbol::Not]);
    }

    #[test]
    fn unknown_symbol_in_clause_is_a_parse_error() {
        let file = write_config(
            r#"
[[clauses]]
id = 1
answer = ["∃", "?", "¬"]
"#,
        );
        let err = HyresisConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), Some(file.path()));
    }

    #[test]
    fn unsolvable_clause_is_rejected() {
        let file = write_config(
            r#"
[[clauses]]
id = 1
answer = ["∃", "¬"]
"#,
        );
        let config = HyresisConfig::load_from(file.path()).unwrap().unwrap();
        assert!(matches!(config.settings(), Err(ConfigError::Clauses(_))));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = HyresisConfig {
            game: GameConfig {
                min_length: 6,
                max_length: 4,
                history_limit: 8,
            },
            ..HyresisConfig::default()
        };
        assert!(matches!(
            config.settings(),
            Err(ConfigError::InvalidBounds { min: 6, max: 4 })
        ));
    }
}
