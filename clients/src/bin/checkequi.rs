//! `checkequi`: prints the Walnut check script for a `Dequi` predicate.
//!
//! **Usage:**
//! ```
//! checkequi <ns> <v> [-p <prefix>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::Result;
use autoseq_codegen::equi::{self, EquiParams, DEFAULT_PREFIX};
use clap::Parser;

/// Produce the check script for the predicate built by the equivalence pipeline.
#[derive(Parser)]
#[command(
    name = "checkequi",
    about = "Produce the check script for the Dequi predicate"
)]
struct Args {
    /// Numeration system.
    ns: String,
    /// Maximum value.
    v: u32,
    /// Walnut predicate prefix.
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    autoseq_clients::init_tracing(false);
    let script = equi::generate(&EquiParams {
        ns: args.ns,
        max_value: args.v,
        prefix: args.prefix,
    })?;
    print!("{script}");
    Ok(())
}
