//! `dfao-count`: counts a DFAO into a reduced linear representation.
//!
//! Projects the automaton onto the `--vars` tracks, counts the transitions
//! over the other tracks, reduces the result over the rationals, and writes
//! `lambda`, one `mu` matrix per projected symbol and `rho` to the output
//! file. `--check` first lists the transitions missing from the automaton.
//!
//! **Usage:**
//! ```
//! dfao-count <input> <output> [--vars 1,2] [--max-iterations N] [--no-reduce] [--check] [--json] [-v]
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
use autoseq_clients::{init_tracing, load_dfao, missing_transition_report, write_output};
use clap::Parser;
use tracing::info;

/// Count a Walnut DFAO into a linear representation.
#[derive(Parser)]
#[command(name = "dfao-count", about = "Count a Walnut DFAO into a linear representation")]
struct Args {
    /// Walnut DFAO file.
    input: PathBuf,
    /// Output file for the matrix representation.
    output: PathBuf,
    /// Tracks kept as input; the others are counted.
    #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2])]
    vars: Vec<usize>,
    /// Bound on the iterations absorbing leading zeros.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Write the counted representation as is, without reducing it.
    #[arg(long)]
    no_reduce: bool,
    /// List the transitions missing over the automaton's alphabet.
    #[arg(long)]
    check: bool,
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

    let started = Instant::now();
    let dfao = load_dfao(&args.input)?;
    info!(alphabet = dfao.alphabet().len(), elapsed = ?started.elapsed(), "loading done");

    if args.check {
        let missing = missing_transition_report(&dfao);
        println!("{} missing transitions", missing.len());
        for line in &missing {
            println!("  {line}");
        }
    }

    let started = Instant::now();
    let mut rep = linrep::count(&dfao, &args.vars, args.max_iterations)
        .with_context(|| format!("Failed to count {}", args.input.display()))?;
    info!(
        dim = rep.dim(),
        letters = rep.mu.len(),
        elapsed = ?started.elapsed(),
        "counting done"
    );

    if !args.no_reduce {
        let started = Instant::now();
        rep = rep.reduce();
        info!(dim = rep.dim(), elapsed = ?started.elapsed(), "reduction done");
    }

    let content = if args.json {
        serde_json::to_string_pretty(&rep)?
    } else {
        rep.render()
    };
    write_output(&args.output, &content)?;

    println!(
        "Linear representation of dimension {} over {} symbols",
        rep.dim(),
        rep.mu.len()
    );
    println!("Entries range from {} to {}", rep.min(), rep.max());
    println!("Written to {}", args.output.display());
    Ok(())
}
