//! Error types for numeration, DFAO loading, evaluation and counting.

use std::path::PathBuf;

use thiserror::Error;

use crate::dfao::StateId;

/// Failures of the numeration system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumerationError {
    /// The seed list has fewer than two terms, is not strictly increasing, or
    /// does not start at 1.
    #[error("invalid seeds {seeds:?}: expected a strictly increasing list starting at 1")]
    InvalidSeeds {
        /// The rejected seeds.
        seeds: Vec<u128>,
    },
    /// The table must hold at least two weights.
    #[error("lookahead {0} is too short: at least 2 weights are needed")]
    InvalidLookahead(usize),
    /// The greedy expansion left a remainder (the weights skip a value).
    #[error("value {0} has no 0/1 representation in this basis")]
    Unrepresentable(u128),
    /// The value needs more weights than the table holds.
    #[error("value {value} exceeds the weight table (largest encodable value is {limit})")]
    OutOfRange {
        /// The value that could not be encoded.
        value: u128,
        /// Largest encodable value for this table.
        limit: u128,
    },
    /// A digit other than 0 or 1.
    #[error("invalid digit {digit} at position {position}")]
    InvalidDigit {
        /// The offending digit.
        digit: u8,
        /// Position from the most significant end.
        position: usize,
    },
    /// A weighted sum overflowed `u128`.
    #[error("weighted digit sum overflows")]
    Overflow,
    /// More digits than weights.
    #[error("{len} digits exceed the {weights} weights of the table")]
    TooManyDigits {
        /// Number of digits supplied.
        len: usize,
        /// Number of weights available.
        weights: usize,
    },
}

/// Failures while reading a Walnut DFAO file.
#[derive(Debug, Error)]
pub enum DfaoError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The reader failed mid-stream.
    #[error("read failed at line {line}: {source}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The input has no header line.
    #[error("missing header line")]
    MissingHeader,
    /// A token is not an integer.
    #[error("line {line}: invalid integer {token:?}")]
    InvalidInteger {
        /// 1-based line number.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },
    /// A state line that is not `<state> <output>`.
    #[error("line {line}: expected `<state> <output>`, found {content:?}")]
    MalformedState {
        /// 1-based line number.
        line: usize,
        /// The trimmed line.
        content: String,
    },
    /// A transition with nothing left of `->`.
    #[error("line {line}: transition has an empty input symbol")]
    EmptySymbol {
        /// 1-based line number.
        line: usize,
    },
    /// A transition appears before any state declaration.
    #[error("line {line}: transition before any state declaration")]
    OrphanTransition {
        /// 1-based line number.
        line: usize,
    },
}

/// Failures while running a DFAO on an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No transition from `state` on `symbol`.
    #[error("no transition from state {state} on symbol {symbol:?} (input position {position})")]
    MissingTransition {
        /// State the automaton was in.
        state: StateId,
        /// Symbol that was read.
        symbol: Vec<i32>,
        /// Position of the symbol in the input.
        position: usize,
    },
    /// A state reached (or the initial state) was never declared.
    #[error("state {0} is not declared")]
    UnknownState(StateId),
}

/// Failures while counting a DFAO into a linear representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinrepError {
    /// A projected track does not exist on some symbol.
    #[error("track {track} out of range for symbol {symbol:?}")]
    TrackOutOfRange {
        /// Requested track index.
        track: usize,
        /// Symbol that is too short.
        symbol: Vec<i32>,
    },
    /// The zero-closure of the initial vector did not stabilise.
    #[error("initial vector did not reach a fixpoint within {0} iterations")]
    NoFixpoint(usize),
    /// The automaton has a transition into an undeclared state.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
