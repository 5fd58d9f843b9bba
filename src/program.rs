//! Program definitions: generation count, turn increment, axiom and rule table.
//!
//! # Text format
//!
//! One `key:value` directive per line:
//!
//! | Key | Meaning |
//! |---|---|
//! | `n` | number of generations (non-negative integer) |
//! | `delta` | turn increment in degrees |
//! | `ic` | axiom, one symbol per character |
//! | anything else | rule: the first character of the key rewrites to `value` |
//!
//! Rule effects come from [`Effect::builtin`]. Key and value are trimmed; blank lines are
//! skipped. Directives apply on top of an existing program, so a file only needs to name
//! what it changes.

use crate::error::{PlotterError, Result};
use crate::grammar::{Effect, GrammarEngine, Rule, RuleTable, Symbol};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Number of rewriting generations.
    pub generations: u32,
    /// Turn increment in degrees.
    pub delta: f32,
    pub axiom: Vec<Symbol>,
    pub rules: RuleTable,
}

impl Default for Program {
    /// The bracketed plant `F -> F[+F]F[-F]F` at five generations, plus the `L`/`R` curve
    /// rules, both of which also step forward.
    fn default() -> Self {
        let rules = Self::base_rules()
            .with('F', "F[+F]F[-F]F", Effect::Forward)
            .with('L', "L+R+", Effect::Forward)
            .with('R', "-L-", Effect::Forward);
        Self {
            generations: 5,
            delta: 25.7,
            axiom: vec!['F'],
            rules,
        }
    }
}

impl Program {
    /// Turn and bracket symbols rewriting to themselves.
    pub fn base_rules() -> RuleTable {
        let mut rules = RuleTable::new();
        for s in ['+', '-', '[', ']'] {
            rules.insert(s, Rule::constant(s, Effect::builtin(s)));
        }
        rules
    }

    /// Parses `text` on top of [`Program::default`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::default().apply(text)
    }

    /// Reads and parses a program file on top of [`Program::default`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().apply(&read_program_file(path.as_ref())?)
    }

    /// Returns a copy of `self` with every directive of `text` applied.
    ///
    /// All-or-nothing: any malformed line, or a result whose axiom or productions use
    /// symbols without rules, fails the whole call. `self` is never modified.
    pub fn apply(&self, text: &str) -> Result<Self> {
        let mut next = self.clone();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let (key, value) = raw.split_once(':').ok_or_else(|| PlotterError::Parse {
                line,
                reason: format!("expected `key:value`, got {raw:?}"),
            })?;
            let key = key.trim();
            let value = value.trim();

            match key {
                "n" => {
                    next.generations = value.parse().map_err(|_| PlotterError::Parse {
                        line,
                        reason: format!("`n` must be a non-negative integer, got {value:?}"),
                    })?;
                }
                "delta" => {
                    next.delta = value
                        .parse::<f32>()
                        .ok()
                        .filter(|d| d.is_finite())
                        .ok_or_else(|| PlotterError::Parse {
                            line,
                            reason: format!("`delta` must be a number, got {value:?}"),
                        })?;
                }
                "ic" => {
                    if value.is_empty() {
                        return Err(PlotterError::Parse {
                            line,
                            reason: "empty axiom".into(),
                        });
                    }
                    next.axiom = value.chars().collect();
                }
                _ => {
                    let mut chars = key.chars();
                    let symbol = chars.next().ok_or_else(|| PlotterError::Parse {
                        line,
                        reason: "empty rule symbol".into(),
                    })?;
                    if chars.next().is_some() {
                        warn!(
                            line,
                            key,
                            %symbol,
                            "multi-character rule key, using first character"
                        );
                    }
                    next.rules.define(symbol, value);
                }
            }
        }

        next.validate()?;
        Ok(next)
    }

    /// Checks that the axiom and every production only use defined symbols.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate(&self.axiom)?;
        self.rules.validate_closed()
    }

    /// Expands the axiom for [`generations`](Self::generations) generations.
    pub fn expand(&self, engine: &GrammarEngine) -> Result<Vec<Symbol>> {
        engine.run(&self.axiom, &self.rules, self.generations)
    }
}

/// Reads a program file, mapping a missing file to [`PlotterError::NotFound`].
pub(crate) fn read_program_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PlotterError::NotFound(path.to_path_buf()),
        _ => PlotterError::Io(e),
    })
}
