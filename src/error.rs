//! Error types shared by the grammar, interpreter and program loader.

use crate::grammar::Symbol;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlotterError {
    /// A symbol in the axiom, a production or the replayed sequence has no rule.
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(Symbol),

    /// A pop (`]`) was executed with no saved state. The grammar is unbalanced.
    #[error("State stack underflow at command {index}")]
    StackUnderflow { index: usize },

    /// A push (`[`) would exceed the configured stack depth. Usually a looped program that
    /// never closes its brackets.
    #[error("State stack overflow at command {index} (limit {limit})")]
    StackOverflow { index: usize, limit: usize },

    /// A program definition line could not be parsed. `line` is 1-based.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Program file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Expanding one more generation would exceed the configured symbol ceiling.
    #[error("Generation {generation} would produce {symbols} symbols (limit {limit})")]
    GrowthLimit {
        generation: u32,
        symbols: u128,
        limit: usize,
    },

    /// The requested generation count is above the configured ceiling.
    #[error("{generations} generations requested (limit {limit})")]
    GenerationLimit { generations: u32, limit: u32 },

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidCanvas { width: usize, height: usize },
}

impl PlotterError {
    /// Returns `false` for conditions the caller may simply report and move on from.
    ///
    /// Currently only [`PlotterError::NotFound`] is non-fatal: the active program
    /// stays loaded and runnable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = PlotterError> = std::result::Result<T, E>;
