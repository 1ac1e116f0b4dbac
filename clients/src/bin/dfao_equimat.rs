//! `dfao-equimat`: the abelian-equivalence matrix of an occurrence DFAO.
//!
//! Reads `occ_<ns>.txt`, a 5-track DFAO counting factor occurrences, and
//! writes `equi<ns>_mat.txt`: the reduced representation of the count minus
//! the same count with tracks 1 and 2 swapped. An empty output file means the
//! two tracks are interchangeable.
//!
//! **Usage:**
//! ```
//! dfao-equimat <ns> [-d <dir>] [--max-iterations N] [--json] [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use autoseq_automaton::linrep::{self, DEFAULT_MAX_ITERATIONS};
use autoseq_clients::{init_tracing, load_dfao, write_output};
use clap::Parser;
use tracing::info;

/// Build the abelian-equivalence matrix of an occurrence DFAO.
#[derive(Parser)]
#[command(name = "dfao-equimat", about = "Build the abelian-equivalence matrix of an occurrence DFAO")]
struct Args {
    /// Numeration system name (`tri` reads `occ_tri.txt`).
    ns: String,
    /// Directory holding the input and receiving the output.
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
    /// Bound on the iterations absorbing leading zeros.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Write the representation as JSON instead of matrices.
    #[arg(long)]
    json: bool,
    /// Log debug details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = args.dir.join(format!("occ_{}.txt", args.ns));
    let output = args.dir.join(format!("equi{}_mat.txt", args.ns));

    let started = Instant::now();
    let dfao = load_dfao(&input)?;
    info!(elapsed = ?started.elapsed(), "loading done");

    let started = Instant::now();
    let rep = linrep::equivalence_matrix(&dfao, args.max_iterations)
        .with_context(|| format!("Failed to count {}", input.display()))?;
    info!(dim = rep.dim(), elapsed = ?started.elapsed(), "equivalence matrix done");

    let content = if args.json {
        serde_json::to_string_pretty(&rep)?
    } else {
        rep.render()
    };
    write_output(&output, &content)?;

    println!(
        "Equivalence matrix of dimension {} over {} symbols",
        rep.dim(),
        rep.mu.len()
    );
    println!("Written to {}", output.display());
    Ok(())
}
