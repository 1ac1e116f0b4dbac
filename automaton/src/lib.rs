//! Numeration systems and deterministic finite automata with output.
//!
//! The `autoseq-automaton` crate holds the data side of the tool set:
//!
//! - [`numeration`]: greedy representations over Tribonacci-like weights,
//!   and alignment of two representations into 2-track symbols.
//! - [`dfao`]: the Walnut DFAO text format (load, evaluate, write back).
//! - [`linrep`]: projection of a DFAO onto some of its tracks, counted into a
//!   linear representation over the rationals, and its reduction.
//!
//! # Entry Point
//!
//! ```
//! use autoseq_automaton::{Basis, Dfao};
//!
//! let dfao = Dfao::parse("msd_tri msd_tri\n0 5\n0 0 -> 1\n1 9\n").unwrap();
//! let basis = Basis::tribonacci();
//! let symbols = basis.encode_pair(0u64, 0u64).unwrap();
//! assert_eq!(dfao.evaluate(&symbols).unwrap(), 9);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod dfao;
pub mod error;
pub mod linrep;
pub mod numeration;

pub use dfao::{Dfao, State, StateId};
pub use error::{DfaoError, EvalError, LinrepError, NumerationError};
pub use linrep::{LinearRepresentation, Weight};
pub use numeration::{align, Basis};
