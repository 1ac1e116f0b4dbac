//! `genabeqk`: prints the Walnut definitions of the k-abelian complexity
//! built from the `Diffabeq` predicate.
//!
//! **Usage:**
//! ```
//! genabeqk <ns> <n> <v>
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::Result;
use autoseq_codegen::abeqk::{self, AbeqkParams};
use clap::Parser;

/// Produce the script computing the k-abelian complexity from `Diffabeq`.
#[derive(Parser)]
#[command(
    name = "genabeqk",
    about = "Produce the k-abelian complexity script from the Diffabeq predicate"
)]
struct Args {
    /// Numeration system.
    ns: String,
    /// k varies from 1 to n.
    n: u32,
    /// Maximum value.
    v: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    autoseq_clients::init_tracing(false);
    let script = abeqk::generate(&AbeqkParams {
        ns: args.ns,
        max_k: args.n,
        max_value: args.v,
    })?;
    print!("{script}");
    Ok(())
}
