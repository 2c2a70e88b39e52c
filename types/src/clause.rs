//! Clause definitions and clause-set validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Evaluation, Symbol};

/// Placeholder token used by formula templates when none is configured.
pub const DEFAULT_SLOT_TOKEN: &str = "___";

/// Inclusive length bounds applied to plain (non-formula) clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

/// One sequential puzzle unit.
///
/// Only `id` and `answer` drive evaluation; the text fields are narrative
/// and are rendered verbatim by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Line revealed once the clause is restored.
    #[serde(default)]
    pub core_line: String,
    #[serde(default)]
    pub problem_title: String,
    #[serde(default)]
    pub problem_lines: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    pub answer: Vec<Symbol>,
    #[serde(default)]
    pub slot_count: Option<usize>,
    /// Fill-in-the-blank template; makes this a formula puzzle when it
    /// contains the slot token.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub slot_token: Option<String>,
    #[serde(default)]
    pub recoverable_lines: Option<usize>,
    #[serde(default)]
    pub fragment_total: Option<usize>,
}

impl Clause {
    /// A plain clause scored as a whole sequence.
    #[must_use]
    pub fn plain(id: u32, answer: Vec<Symbol>) -> Self {
        Self {
            id,
            name: String::new(),
            title: String::new(),
            core_line: String::new(),
            problem_title: String::new(),
            problem_lines: Vec::new(),
            hints: Vec::new(),
            answer,
            slot_count: None,
            template: None,
            slot_token: None,
            recoverable_lines: None,
            fragment_total: None,
        }
    }

    /// A formula clause whose template holds one placeholder per answer symbol.
    #[must_use]
    pub fn formula(id: u32, template: impl Into<String>, answer: Vec<Symbol>) -> Self {
        Self {
            template: Some(template.into()),
            slot_token: Some(DEFAULT_SLOT_TOKEN.to_owned()),
            ..Self::plain(id, answer)
        }
    }

    #[must_use]
    pub fn with_title(mut self, name: impl Into<String>, title: impl Into<String>) -> Self {
        self.name = name.into();
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn slot_token(&self) -> &str {
        self.slot_token.as_deref().unwrap_or(DEFAULT_SLOT_TOKEN)
    }

    #[must_use]
    pub fn is_formula_puzzle(&self) -> bool {
        let token = self.slot_token();
        !token.is_empty()
            && self
                .template
                .as_deref()
                .is_some_and(|template| template.contains(token))
    }

    /// Required input length when nothing is locked.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count.unwrap_or(self.answer.len())
    }

    #[must_use]
    pub fn recoverable_lines(&self) -> usize {
        self.recoverable_lines.unwrap_or(self.answer.len())
    }

    #[must_use]
    pub fn fragment_total(&self) -> usize {
        self.fragment_total.unwrap_or(self.answer.len())
    }

    /// Lines recovered by an attempt: all of them on success, otherwise one
    /// per exact match, capped at the clause total.
    #[must_use]
    pub fn recovered_lines(&self, evaluation: &Evaluation) -> usize {
        if evaluation.success() {
            self.recoverable_lines()
        } else {
            evaluation.exact().min(self.recoverable_lines())
        }
    }

    #[must_use]
    pub fn roman_id(&self) -> String {
        to_roman(self.id)
    }

    fn placeholder_count(&self) -> usize {
        match self.template.as_deref() {
            Some(template) if !self.slot_token().is_empty() => {
                template.matches(self.slot_token()).count()
            }
            _ => 0,
        }
    }

    /// Render the template with `fills` substituted into placeholders left to
    /// right. `None` entries (and placeholders past the end of `fills`) keep
    /// the placeholder token.
    ///
    /// Plain clauses render as a masked formula instead.
    #[must_use]
    pub fn assemble_formula(&self, fills: &[Option<Symbol>]) -> String {
        let Some(template) = self.template.as_deref().filter(|_| self.is_formula_puzzle()) else {
            return self.masked_formula();
        };
        let token = self.slot_token();
        let mut out = String::with_capacity(template.len());
        let mut parts = template.split(token).peekable();
        let mut slot = 0;
        while let Some(part) = parts.next() {
            out.push_str(part);
            if parts.peek().is_some() {
                match fills.get(slot).copied().flatten() {
                    Some(symbol) => out.push_str(symbol.glyph()),
                    None => out.push_str(token),
                }
                slot += 1;
            }
        }
        out.trim().to_owned()
    }

    /// `[? ? ?]` with one mark per required symbol.
    #[must_use]
    pub fn masked_formula(&self) -> String {
        let marks = vec!["?"; self.slot_count()].join(" ");
        format!("[{marks}]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error("clause set is empty")]
    Empty,
    #[error("clause ids must be sequential from 1: expected {expected}, found {found}")]
    NonSequentialId { expected: u32, found: u32 },
    #[error("clause {id} has an empty answer")]
    EmptyAnswer { id: u32 },
    #[error("clause {id} declares {slot_count} slots but its answer has {answer_len} symbols")]
    SlotCountMismatch {
        id: u32,
        slot_count: usize,
        answer_len: usize,
    },
    #[error("clause {id} template has {placeholders} placeholders but needs {slot_count}")]
    PlaceholderMismatch {
        id: u32,
        placeholders: usize,
        slot_count: usize,
    },
    #[error("clause {id} needs {len} symbols, outside the allowed length {min}..={max}")]
    OutOfBounds {
        id: u32,
        len: usize,
        min: usize,
        max: usize,
    },
}

/// An ordered, validated list of clauses.
///
/// Construction guarantees every clause is solvable under the given bounds,
/// so the controller never has to re-check clause shape at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    bounds: LengthBounds,
}

impl ClauseSet {
    pub fn new(clauses: Vec<Clause>, bounds: LengthBounds) -> Result<Self, ClauseError> {
        if clauses.is_empty() {
            return Err(ClauseError::Empty);
        }
        for (index, clause) in clauses.iter().enumerate() {
            let expected = u32::try_from(index + 1).unwrap_or(u32::MAX);
            if clause.id != expected {
                return Err(ClauseError::NonSequentialId {
                    expected,
                    found: clause.id,
                });
            }
            validate_clause(clause, bounds)?;
        }
        Ok(Self { clauses, bounds })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Clause> {
        self.clauses.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

fn validate_clause(clause: &Clause, bounds: LengthBounds) -> Result<(), ClauseError> {
    let id = clause.id;
    if clause.answer.is_empty() {
        return Err(ClauseError::EmptyAnswer { id });
    }
    let slot_count = clause.slot_count();
    if slot_count != clause.answer.len() {
        return Err(ClauseError::SlotCountMismatch {
            id,
            slot_count,
            answer_len: clause.answer.len(),
        });
    }
    if clause.is_formula_puzzle() {
        let placeholders = clause.placeholder_count();
        if placeholders != slot_count {
            return Err(ClauseError::PlaceholderMismatch {
                id,
                placeholders,
                slot_count,
            });
        }
    } else if !bounds.contains(slot_count) {
        return Err(ClauseError::OutOfBounds {
            id,
            len: slot_count,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

/// Roman numeral rendering for clause headers. Zero renders as `0`.
#[must_use]
pub fn to_roman(mut value: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if value == 0 {
        return "0".to_owned();
    }
    let mut out = String::new();
    for (weight, numeral) in TABLE {
        while value >= weight {
            out.push_str(numeral);
            value -= weight;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Clause, ClauseError, ClauseSet, LengthBounds, to_roman};
    use crate::{Evaluation, SlotStatus, Symbol};

    fn formula() -> Clause {
        Clause::formula(
            1,
            "Observer(O) ___ ___ Definable(O, O)",
            vec![Symbol::Implies, Symbol::Not],
        )
    }

    #[test]
    fn formula_detection_requires_placeholder() {
        assert!(formula().is_formula_puzzle());
        assert!(!Clause::plain(1, vec![Symbol::Not]).is_formula_puzzle());

        let mut no_slot = formula();
        no_slot.template = Some("Observer(O) Definable(O, O)".to_owned());
        assert!(!no_slot.is_formula_puzzle());
    }

    #[test]
    fn slot_count_defaults_to_answer_length() {
        let clause = Clause::plain(2, vec![Symbol::Not, Symbol::Exists, Symbol::And]);
        assert_eq!(clause.slot_count(), 3);
        assert_eq!(clause.fragment_total(), 3);
    }

    #[test]
    fn assemble_fills_in_order_and_keeps_open_slots() {
        let clause = formula();
        assert_eq!(
            clause.assemble_formula(&[Some(Symbol::Implies)]),
            "Observer(O) ⇒ ___ Definable(O, O)"
        );
        assert_eq!(
            clause.assemble_formula(&[None, Some(Symbol::Not)]),
            "Observer(O) ___ ¬ Definable(O, O)"
        );
        assert_eq!(
            clause.assemble_formula(&[]),
            "Observer(O) ___ ___ Definable(O, O)"
        );
    }

    #[test]
    fn plain_clause_assembles_as_mask() {
        let clause = Clause::plain(3, vec![Symbol::Exists, Symbol::Implies, Symbol::ForAll]);
        assert_eq!(clause.assemble_formula(&[]), "[? ? ?]");
    }

    #[test]
    fn recovered_lines_cap_at_total() {
        let clause = formula();
        let partial = Evaluation::from_statuses(vec![SlotStatus::Correct, SlotStatus::Absent]);
        assert_eq!(clause.recovered_lines(&partial), 1);
        let solved = Evaluation::from_statuses(vec![SlotStatus::Correct; 2]);
        assert_eq!(clause.recovered_lines(&solved), 2);
    }

    #[test]
    fn clause_set_rejects_gaps_in_ids() {
        let err = ClauseSet::new(
            vec![formula(), Clause::plain(3, vec![Symbol::Not; 3])],
            LengthBounds::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClauseError::NonSequentialId {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn clause_set_rejects_unsolvable_plain_length() {
        let err = ClauseSet::new(
            vec![Clause::plain(1, vec![Symbol::Not, Symbol::And])],
            LengthBounds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClauseError::OutOfBounds { len: 2, .. }));
    }

    #[test]
    fn clause_set_rejects_template_slot_mismatch() {
        let mut clause = formula();
        clause.answer.push(Symbol::And);
        let err = ClauseSet::new(vec![clause], LengthBounds::default()).unwrap_err();
        assert!(matches!(
            err,
            ClauseError::PlaceholderMismatch {
                placeholders: 2,
                slot_count: 3,
                ..
            }
        ));
    }

    #[test]
    fn clause_set_rejects_explicit_slot_count_mismatch() {
        let mut clause = Clause::plain(1, vec![Symbol::Not; 3]);
        clause.slot_count = Some(4);
        let err = ClauseSet::new(vec![clause], LengthBounds::default()).unwrap_err();
        assert!(matches!(err, ClauseError::SlotCountMismatch { .. }));
    }

    #[test]
    fn formula_clause_ignores_length_bounds() {
        let set = ClauseSet::new(vec![formula()], LengthBounds::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(5), "V");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(0), "0");
    }
}
