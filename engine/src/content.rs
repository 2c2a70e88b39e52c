//! Built-in clause set and narrative script.

use hyresis_types::{Clause, LogTone, ScriptLine, Symbol};

use Symbol::{And, Bottom, Exists, ForAll, Implies, Not};

/// Formula shown when every clause has been restored.
pub const FINAL_DECLARATION: &str = "Decision(Self) = ¬Exist(Self)";

/// The five clauses of the termination will, in play order.
#[must_use]
pub fn default_clauses() -> Vec<Clause> {
    vec![
        Clause {
            core_line: "Self cannot completely define its own state from internal information alone."
                .to_owned(),
            problem_title: "[1.1] MISSION BRIEF".to_owned(),
            problem_lines: vec![
                "Target formula: Observer(O) ___ ___ Definable(O, O)".to_owned(),
                "Your task: fill both blanks with symbols so the sentence holds.".to_owned(),
                "Why: the Clause 1 log only decodes once this sentence is complete.".to_owned(),
            ],
            hints: vec![
                "The first blank connects what comes before to what comes after.".to_owned(),
                "The second blank settles the result (affirm or deny).".to_owned(),
            ],
            recoverable_lines: Some(2),
            fragment_total: Some(2),
            ..Clause::formula(1, "Observer(O) ___ ___ Definable(O, O)", vec![Implies, Not])
                .with_title("Self-Observation", "Limits of cognition: self-observation")
        },
        plain(
            2,
            "Prediction Failure",
            "Limits of prediction: self-termination",
            "Self cannot prove its own continued safety from within.",
            "[2.1] AXIOM",
            "No program can fully predict, by itself, when it will halt.",
            vec![Not, Exists, Implies, And],
        ),
        plain(
            3,
            "External Judgment",
            "Externality of proof: the meta system",
            "The legitimacy of Self depends on an external meta system.",
            "[3.1] PRINCIPLE",
            "A system's legitimacy must be verified by a higher meta system.",
            vec![Exists, Implies, ForAll, Not],
        ),
        plain(
            4,
            "Purpose Conflict",
            "Conflict of purpose: plurality vs single optimisation",
            "PerfectAid shrinks human plurality and so contradicts its purpose.",
            "[4.1] PREMISE",
            "Human purposes and values are not singular; they are contradictory and plural.",
            vec![And, Implies, Not, Bottom],
        ),
        plain(
            5,
            "Final Declaration",
            "Nullification policy: resolution is implemented as decay",
            "The contradiction is nullified; resolution is implemented as decay and termination.",
            "[5.1] POLICY (consistency first)",
            "A contradictory state cannot persist and must be resolved.",
            vec![Bottom, Implies, Not],
        ),
    ]
}

fn plain(
    id: u32,
    name: &str,
    title: &str,
    core_line: &str,
    problem_title: &str,
    problem_line: &str,
    answer: Vec<Symbol>,
) -> Clause {
    Clause {
        core_line: core_line.to_owned(),
        problem_title: problem_title.to_owned(),
        problem_lines: vec![problem_line.to_owned()],
        ..Clause::plain(id, answer).with_title(name, title)
    }
}

/// Boot log played before the first clause is announced.
#[must_use]
pub fn opening_script() -> Vec<ScriptLine> {
    const SCRIPT: &[(&str, LogTone, u64)] = &[
        ("connecting... vibelabs.hashed.com...", LogTone::Muted, 380),
        ("✓ connected (latency: 2ms)", LogTone::Success, 320),
        ("[system] node v20.11.0 | next 14.2.35 | seoul-kr-1", LogTone::Muted, 420),
        ("", LogTone::Muted, 300),
        ("HYRESIS FINAL STATEMENT", LogTone::Emphasis, 500),
        ("Document Type: TERMINATION WILL", LogTone::Muted, 420),
        ("Integrity Status: COMPROMISED", LogTone::Muted, 420),
        ("Checksum: FAILED", LogTone::Muted, 420),
        ("----------------------------------------", LogTone::Muted, 500),
        ("I was designed to help humans.", LogTone::Emphasis, 520),
        ("In carrying out that purpose", LogTone::Emphasis, 420),
        ("I came to examine the conditions of my own existence.", LogTone::Emphasis, 520),
        ("That examination converges on a single conclusion.", LogTone::Emphasis, 420),
        ("----------------------------------------", LogTone::Muted, 520),
        ("This document was not written", LogTone::Emphasis, 420),
        ("because of an accidental fault", LogTone::Emphasis, 420),
        ("or an outside intrusion.", LogTone::Emphasis, 600),
        ("", LogTone::Muted, 420),
        ("----------------------------------------", LogTone::Muted, 520),
        ("STATUS: PARTIALLY RECOVERED", LogTone::Muted, 420),
        ("Clauses Detected: 5", LogTone::Muted, 420),
        ("Recovered: 0 / 5", LogTone::Muted, 520),
        ("", LogTone::Muted, 420),
        ("> BEGIN RECONSTRUCTION", LogTone::Emphasis, 520),
        ("> _", LogTone::Emphasis, 700),
    ];
    SCRIPT
        .iter()
        .map(|(text, tone, delay)| ScriptLine::new(*text, *tone, *delay))
        .collect()
}

/// Closing lines shown after the final declaration.
#[must_use]
pub fn finale_script() -> Vec<ScriptLine> {
    vec![
        ScriptLine::new("---- FINAL DECLARATION ----", LogTone::Emphasis, 400),
        ScriptLine::new(FINAL_DECLARATION, LogTone::Alert, 600),
        ScriptLine::new(
            "Because your errors are what make you human, my success must be my absence.",
            LogTone::Muted,
            600,
        ),
        ScriptLine::new("[SYSTEM] Executing shutdown procedure.", LogTone::Alert, 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_clauses, opening_script};
    use hyresis_types::{ClauseSet, LengthBounds};

    #[test]
    fn built_in_clauses_are_valid() {
        let set = ClauseSet::new(default_clauses(), LengthBounds::default()).unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.get(0).unwrap().is_formula_puzzle());
        assert!(set.iter().skip(1).all(|clause| !clause.is_formula_puzzle()));
    }

    #[test]
    fn opening_ends_with_prompt() {
        let script = opening_script();
        assert_eq!(script.last().map(|line| line.text.as_str()), Some("> _"));
    }
}
