//! Symbol rewriting: rule tables, per-generation expansion and growth prediction.
//!
//! A [`Rule`] is plain data. Its `production` drives rewriting, its [`Effect`] drives the
//! turtle when the symbol is executed instead of rewritten. Keeping both in one record lets
//! the whole program be validated (unknown symbols, bracket balance) before any replay.

use crate::error::{PlotterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A single grammar token. One character of the program text.
pub type Symbol = char;

/// The turtle action a symbol performs when executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Step forward by `d`, emitting a segment (`F`).
    Forward,
    /// `heading += delta` (`-`).
    TurnLeft,
    /// `heading -= delta` (`+`).
    TurnRight,
    /// Save the turtle state (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// Symbol exists only to be rewritten.
    NoOp,
}

impl Effect {
    /// Maps a symbol to its conventional effect. Unrecognized symbols are [`Effect::NoOp`].
    pub fn builtin(symbol: Symbol) -> Self {
        match symbol {
            'F' => Effect::Forward,
            '+' => Effect::TurnRight,
            '-' => Effect::TurnLeft,
            '[' => Effect::Push,
            ']' => Effect::Pop,
            _ => Effect::NoOp,
        }
    }
}

/// Rewrite target and execution effect of one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub production: Vec<Symbol>,
    pub effect: Effect,
}

impl Rule {
    pub fn new(production: &str, effect: Effect) -> Self {
        Self {
            production: production.chars().collect(),
            effect,
        }
    }

    /// A rule that rewrites the symbol to itself.
    pub fn constant(symbol: Symbol, effect: Effect) -> Self {
        Self {
            production: vec![symbol],
            effect,
        }
    }
}

/// Case-sensitive mapping from [`Symbol`] to [`Rule`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: HashMap<Symbol, Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the rule for `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: Symbol, rule: Rule) -> Option<Rule> {
        self.rules.insert(symbol, rule)
    }

    /// Defines `symbol -> production` with the effect given by [`Effect::builtin`].
    pub fn define(&mut self, symbol: Symbol, production: &str) -> Option<Rule> {
        self.insert(symbol, Rule::new(production, Effect::builtin(symbol)))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, symbol: Symbol, production: &str, effect: Effect) -> Self {
        self.insert(symbol, Rule::new(production, effect));
        self
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Rule> {
        self.rules.get(&symbol)
    }

    pub fn effect_of(&self, symbol: Symbol) -> Option<Effect> {
        self.rules.get(&symbol).map(|r| r.effect)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Rule)> {
        self.rules.iter().map(|(s, r)| (*s, r))
    }

    fn production(&self, symbol: Symbol) -> Result<&[Symbol]> {
        self.rules
            .get(&symbol)
            .map(|r| r.production.as_slice())
            .ok_or(PlotterError::UnknownSymbol(symbol))
    }

    /// Fails with the first symbol of `sequence` that has no rule.
    pub fn validate(&self, sequence: &[Symbol]) -> Result<()> {
        match sequence.iter().find(|s| !self.contains(**s)) {
            Some(s) => Err(PlotterError::UnknownSymbol(*s)),
            None => Ok(()),
        }
    }

    /// Checks that every production only uses symbols the table defines.
    ///
    /// Symbols are visited in sorted order so the reported symbol is stable.
    pub fn validate_closed(&self) -> Result<()> {
        let mut symbols: Vec<Symbol> = self.rules.keys().copied().collect();
        symbols.sort_unstable();
        for symbol in symbols {
            self.validate(&self.rules[&symbol].production)?;
        }
        Ok(())
    }
}

/// Rewrites every symbol of `sequence` to its production, preserving order.
///
/// Aborts on the first symbol without a rule.
pub fn expand(sequence: &[Symbol], rules: &RuleTable) -> Result<Vec<Symbol>> {
    let mut next = Vec::with_capacity(sequence.len());
    for &symbol in sequence {
        next.extend_from_slice(rules.production(symbol)?);
    }
    Ok(next)
}

/// Applies [`expand`] `generations` times starting from `axiom`.
///
/// Stops early once a generation rewrites to itself, since every later one is identical.
pub fn run(axiom: &[Symbol], rules: &RuleTable, generations: u32) -> Result<Vec<Symbol>> {
    let mut current = axiom.to_vec();
    for _ in 0..generations {
        let next = expand(&current, rules)?;
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}

/// Predicted sequence length for each generation `0..=generations`.
///
/// Propagates per-symbol counts instead of materializing the sequences, so it works even
/// when the real expansion would not fit in memory. Counts saturate at `u128::MAX`.
///
/// The result stops early once the symbol counts stop changing (a non-growing grammar, or
/// every count saturated): the last entry then holds for all remaining generations.
pub fn growth(axiom: &[Symbol], rules: &RuleTable, generations: u32) -> Result<Vec<u128>> {
    rules.validate(axiom)?;

    let mut counts: HashMap<Symbol, u128> = HashMap::new();
    for &s in axiom {
        *counts.entry(s).or_default() += 1;
    }

    let mut lengths = vec![axiom.len() as u128];

    for _ in 0..generations {
        let mut next: HashMap<Symbol, u128> = HashMap::new();
        for (&symbol, &count) in &counts {
            for &out in rules.production(symbol)? {
                let slot = next.entry(out).or_default();
                *slot = slot.saturating_add(count);
            }
        }
        if next == counts {
            break;
        }
        let total = next.values().fold(0u128, |acc, c| acc.saturating_add(*c));
        lengths.push(total);
        counts = next;
    }

    Ok(lengths)
}

/// Static push/pop balance check over an expanded command sequence.
///
/// Returns the number of pushes left open at the end, or
/// [`PlotterError::StackUnderflow`] at the first command that would pop an empty stack.
pub fn check_balance(commands: &[Symbol], rules: &RuleTable) -> Result<usize> {
    let mut depth = 0usize;
    for (index, &symbol) in commands.iter().enumerate() {
        match rules.effect_of(symbol) {
            Some(Effect::Push) => depth += 1,
            Some(Effect::Pop) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(PlotterError::StackUnderflow { index })?;
            }
            Some(_) => {}
            None => return Err(PlotterError::UnknownSymbol(symbol)),
        }
    }
    Ok(depth)
}

/// Expansion with ceilings on generation count and on the symbols a generation may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarEngine {
    pub max_symbols: usize,
    pub max_generations: u32,
}

impl Default for GrammarEngine {
    fn default() -> Self {
        Self {
            max_symbols: 4_000_000,
            max_generations: 1024,
        }
    }
}

impl GrammarEngine {
    pub fn new(max_symbols: usize) -> Self {
        Self {
            max_symbols,
            ..Self::default()
        }
    }

    /// Sets the generation ceiling (builder pattern).
    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Like [`expand`], but refuses to build a sequence longer than `max_symbols`.
    ///
    /// `generation` is only used for error reporting.
    pub fn expand(
        &self,
        sequence: &[Symbol],
        rules: &RuleTable,
        generation: u32,
    ) -> Result<Vec<Symbol>> {
        let mut len: u128 = 0;
        for &symbol in sequence {
            len += rules.production(symbol)?.len() as u128;
        }
        if len > self.max_symbols as u128 {
            return Err(PlotterError::GrowthLimit {
                generation,
                symbols: len,
                limit: self.max_symbols,
            });
        }
        expand(sequence, rules)
    }

    /// Like [`run`], checking the symbol ceiling before each generation is allocated.
    ///
    /// Generation counts above `max_generations` are refused up front, even for grammars
    /// that would reach a fixed point early.
    pub fn run(
        &self,
        axiom: &[Symbol],
        rules: &RuleTable,
        generations: u32,
    ) -> Result<Vec<Symbol>> {
        rules.validate(axiom)?;
        if generations > self.max_generations {
            return Err(PlotterError::GenerationLimit {
                generations,
                limit: self.max_generations,
            });
        }
        let mut current = axiom.to_vec();
        for generation in 1..=generations {
            let next = self.expand(&current, rules, generation)?;
            if next == current {
                debug!(generation, symbols = current.len(), "fixed point reached");
                break;
            }
            current = next;
            debug!(generation, symbols = current.len(), "expanded generation");
        }
        Ok(current)
    }
}
