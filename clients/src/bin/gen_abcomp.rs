//! `gen-abcomp`: generates the k-abelian complexity pipeline of a substitution.
//!
//! By default writes a Quarto notebook `<name>.qmd`. With `-z` it writes a
//! standalone Walnut instance instead, archived as `<name>.zip` with a
//! `go` driver script.
//!
//! **Usage:**
//! ```
//! gen-abcomp [-f <from>] [-t <to>] [-o <output>] [-z] [-v] [-S] <name> <subst> [fullname]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use autoseq_codegen::abcomp::{self, AbcompParams, DEFAULT_WALNUT_MEM};
use clap::Parser;

/// Abelian complexity generator.
///
/// Assumes the 2-block substitution is Pisot and tries to compute automatic
/// sequences for the complexities. Typical usage: `gen-abcomp -f 1 -t 5 tri '01/02/0'`.
#[derive(Parser)]
#[command(name = "gen-abcomp", about = "Generate the k-abelian complexity pipeline of a substitution")]
struct Args {
    /// First k-abelian complexity to compute.
    #[arg(short, long = "from", default_value_t = 1)]
    from: u32,
    /// Last k-abelian complexity to compute.
    #[arg(short, long = "to", default_value_t = 4)]
    to: u32,
    /// Output file (defaults to `<name>.qmd`, or `<name>.zip` with `-z`).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Create an archived Walnut instance instead of a notebook.
    #[arg(short = 'z', long = "zip")]
    bundle: bool,
    /// Display more messages (here and in the generated scripts).
    #[arg(short, long)]
    verbose: bool,
    /// Display statistics about computations in the generated scripts.
    #[arg(short = 'S', long)]
    stats: bool,
    /// Java heap size exported by the bundle's `go` script.
    #[arg(long, env = "WALNUT_MEM", default_value = DEFAULT_WALNUT_MEM)]
    walnut_mem: String,
    /// Numeration system and fixpoint naming.
    name: String,
    /// Substitution considered, e.g. `01/02/0`.
    subst: String,
    /// Full name of the studied sequence (for the title).
    fullname: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    autoseq_clients::init_tracing(args.verbose);

    let params = AbcompParams {
        name: args.name.clone(),
        subst: args.subst,
        fullname: args.fullname,
        from: args.from,
        to: args.to,
        verbose: args.verbose,
        stats: args.stats,
        walnut_mem: args.walnut_mem,
        date: chrono::Local::now().date_naive(),
    };

    let report = if args.bundle {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.zip", args.name)));
        abcomp::write_bundle(&params, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?
    } else {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.qmd", args.name)));
        abcomp::write_notebook(&params, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?
    };

    println!(
        "Generated k-abelian complexity for k = {}..={} ({} levels)",
        params.from, params.to, report.levels
    );
    println!("Files written ({}):", report.files.len());
    for file in &report.files {
        println!("  {}", file);
    }
    Ok(())
}
