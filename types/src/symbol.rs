//! The fixed symbol alphabet players compose attempts from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A logic symbol accepted as puzzle input.
///
/// Symbols serialize as their glyph (`"⇒"`, `"t+1"`, ...) so clause answers
/// can be written naturally in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbol {
    ForAll,
    Exists,
    Implies,
    Derives,
    Equal,
    Not,
    Bottom,
    And,
    Time,
    NextTime,
    Delta,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symbol `{0}`")]
pub struct SymbolParseError(pub String);

impl Symbol {
    /// Every symbol, in palette order (grouped by [`SymbolGroup`]).
    pub const ALL: [Symbol; 11] = [
        Symbol::ForAll,
        Symbol::Exists,
        Symbol::Implies,
        Symbol::Derives,
        Symbol::Equal,
        Symbol::Not,
        Symbol::Bottom,
        Symbol::And,
        Symbol::Time,
        Symbol::NextTime,
        Symbol::Delta,
    ];

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Symbol::ForAll => "∀",
            Symbol::Exists => "∃",
            Symbol::Implies => "⇒",
            Symbol::Derives => "⊢",
            Symbol::Equal => "=",
            Symbol::Not => "¬",
            Symbol::Bottom => "⊥",
            Symbol::And => "∧",
            Symbol::Time => "t",
            Symbol::NextTime => "t+1",
            Symbol::Delta => "Δ",
        }
    }

    /// ASCII stand-in used when the terminal cannot draw the glyph.
    #[must_use]
    pub const fn ascii(self) -> &'static str {
        match self {
            Symbol::ForAll => "A",
            Symbol::Exists => "E",
            Symbol::Implies => "=>",
            Symbol::Derives => "|-",
            Symbol::Equal => "=",
            Symbol::Not => "~",
            Symbol::Bottom => "_|_",
            Symbol::And => "^",
            Symbol::Time => "t",
            Symbol::NextTime => "t+1",
            Symbol::Delta => "d",
        }
    }

    #[must_use]
    pub const fn group(self) -> SymbolGroup {
        match self {
            Symbol::ForAll | Symbol::Exists => SymbolGroup::Quantifiers,
            Symbol::Implies | Symbol::Derives | Symbol::Equal => SymbolGroup::Relations,
            Symbol::Not | Symbol::Bottom => SymbolGroup::Negation,
            Symbol::And => SymbolGroup::Connectives,
            Symbol::Time | Symbol::NextTime | Symbol::Delta => SymbolGroup::Time,
        }
    }

    /// Slash command that inserts this symbol from the palette.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Symbol::ForAll => "/all",
            Symbol::Exists => "/exist",
            Symbol::Implies => "/then",
            Symbol::Derives => "/derive",
            Symbol::Equal => "/equal",
            Symbol::Not => "/not",
            Symbol::Bottom => "/conflict",
            Symbol::And => "/and",
            Symbol::Time => "/t",
            Symbol::NextTime => "/next",
            Symbol::Delta => "/delta",
        }
    }

    /// Short meaning shown beside the symbol in the palette.
    #[must_use]
    pub const fn meaning(self) -> &'static str {
        match self {
            Symbol::ForAll => "for all",
            Symbol::Exists => "exists",
            Symbol::Implies => "implies",
            Symbol::Derives => "derives",
            Symbol::Equal => "equals",
            Symbol::Not => "not",
            Symbol::Bottom => "contradiction",
            Symbol::And => "and",
            Symbol::Time => "time t",
            Symbol::NextTime => "time t+1",
            Symbol::Delta => "change",
        }
    }

    /// Phrase used when reading an attempt back as a sentence.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Symbol::ForAll => "every",
            Symbol::Exists => "there exists",
            Symbol::Implies => "if so then",
            Symbol::Derives => "it follows",
            Symbol::Equal => "is identical",
            Symbol::Not => "is not",
            Symbol::Bottom => "contradiction",
            Symbol::And => "and",
            Symbol::Time => "at time t",
            Symbol::NextTime => "at time t+1",
            Symbol::Delta => "over time",
        }
    }

    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Symbol::ForAll => &["forall", "all", "every"],
            Symbol::Exists => &["exists", "exist", "thereis"],
            Symbol::Implies => &["implies", "then", "ifthen"],
            Symbol::Derives => &["derive", "proof", "entails"],
            Symbol::Equal => &["equal", "same"],
            Symbol::Not => &["not", "neg", "deny"],
            Symbol::Bottom => &["false", "bottom", "conflict"],
            Symbol::And => &["and", "conj"],
            Symbol::Time => &["time", "t0"],
            Symbol::NextTime => &["next", "t1"],
            Symbol::Delta => &["delta", "change"],
        }
    }

    /// Parse a single whitespace-free token. Only exact glyphs are accepted.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|symbol| symbol.glyph() == token)
    }

    /// Case-insensitive palette match against glyph, command, meaning and aliases.
    ///
    /// An empty query matches every symbol.
    #[must_use]
    pub fn matches_query(self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.glyph().contains(query.as_str())
            || self.command().contains(query.as_str())
            || self.meaning().contains(query.as_str())
            || self.aliases().iter().any(|alias| alias.contains(query.as_str()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SymbolParseError(s.to_owned()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.glyph().to_owned()
    }
}

/// Display grouping for the symbol bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolGroup {
    Quantifiers,
    Relations,
    Negation,
    Connectives,
    Time,
}

impl SymbolGroup {
    pub const ALL: [SymbolGroup; 5] = [
        SymbolGroup::Quantifiers,
        SymbolGroup::Relations,
        SymbolGroup::Negation,
        SymbolGroup::Connectives,
        SymbolGroup::Time,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SymbolGroup::Quantifiers => "[Quantifiers]",
            SymbolGroup::Relations => "[Relations]",
            SymbolGroup::Negation => "[Negation]",
            SymbolGroup::Connectives => "[Connectives]",
            SymbolGroup::Time => "[Time]",
        }
    }

    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(move |symbol| symbol.group() == self)
    }
}

/// Join symbols into the canonical space-separated input form.
#[must_use]
pub fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|symbol| symbol.glyph())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{Symbol, SymbolGroup, join_symbols};

    #[test]
    fn parse_accepts_every_glyph() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::parse(symbol.glyph()), Some(symbol));
        }
    }

    #[test]
    fn parse_rejects_commands_and_aliases() {
        assert_eq!(Symbol::parse("/not"), None);
        assert_eq!(Symbol::parse("not"), None);
        assert_eq!(Symbol::parse("t+2"), None);
        assert_eq!(Symbol::parse(""), None);
    }

    #[test]
    fn multi_char_glyph_is_distinct_from_prefix() {
        assert_eq!(Symbol::parse("t"), Some(Symbol::Time));
        assert_eq!(Symbol::parse("t+1"), Some(Symbol::NextTime));
    }

    #[test]
    fn groups_cover_alphabet_in_palette_order() {
        let flattened: Vec<Symbol> = SymbolGroup::ALL
            .into_iter()
            .flat_map(SymbolGroup::symbols)
            .collect();
        assert_eq!(flattened, Symbol::ALL.to_vec());
    }

    #[test]
    fn query_matches_alias_and_command() {
        assert!(Symbol::Not.matches_query("neg"));
        assert!(Symbol::Not.matches_query("/NOT"));
        assert!(Symbol::Bottom.matches_query("contra"));
        assert!(!Symbol::ForAll.matches_query("delta"));
        assert!(Symbol::Delta.matches_query("   "));
    }

    #[test]
    fn deserializes_from_glyph() {
        let parsed: Vec<Symbol> = serde_json::from_str(r#"["⇒", "¬", "t+1"]"#).unwrap();
        assert_eq!(parsed, vec![Symbol::Implies, Symbol::Not, Symbol::NextTime]);

        let err = serde_json::from_str::<Symbol>(r#""?""#).unwrap_err();
        assert!(err.to_string().contains("unknown symbol"));
    }

    #[test]
    fn join_uses_single_spaces() {
        assert_eq!(join_symbols(&[Symbol::Implies, Symbol::Not]), "⇒ ¬");
        assert_eq!(join_symbols(&[]), "");
    }
}
