//! Walnut script generators.
//!
//! Produces the Walnut command scripts that accompany automatic-sequence
//! proofs: a consistency check for the `Dequi` equivalence predicate
//! ([`equi`]), the k-abelian complexity sums over `Diffabeq` ([`abeqk`]), and
//! the full k-abelian complexity pipeline of a substitution ([`abcomp`]),
//! either as a Quarto notebook or as a standalone Walnut instance archived
//! with a `go` script.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod abcomp;
pub mod abeqk;
pub mod bundle;
pub mod emit;
pub mod equi;
pub mod error;
pub mod sink;
pub mod walnut;

pub use abcomp::AbcompParams;
pub use abeqk::AbeqkParams;
pub use bundle::{Bundle, BundleFile};
pub use equi::EquiParams;
pub use error::CodegenError;
pub use sink::{BundleSink, NotebookSink, ScriptSink};

/// Report of what was generated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of block sizes `k` covered.
    pub levels: u32,
    /// Files written (or archive entries, for a bundle).
    pub files: Vec<String>,
}
