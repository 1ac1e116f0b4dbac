//! `drawvectortri`: draws a tri-automatic 2D sequence summed along a vector.
//!
//! The value at `(k, n)` adds `dx` evaluations of the first automaton along
//! the `n` axis and `dy` evaluations of the second one along the `k` axis,
//! starting where the first walk ended.
//!
//! **Usage:**
//! ```
//! drawvectortri <input_dx> <input_dy> <dx> <dy> <size> <output> [--lookahead N] [--json] [-v]
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
use autoseq_clients::{init_tracing, load_dfao, print_stats, BasisArgs, StatsOutput};
use autoseq_render::{rasterize, write_image, VectorField};
use clap::Parser;
use tracing::info;

/// Draw a tri-automatic 2D sequence along a picture vector.
#[derive(Parser)]
#[command(
    name = "drawvectortri",
    about = "Draw a tri-automatic 2D sequence along a picture vector"
)]
struct Args {
    /// Walnut DFAO file summed along `n`.
    input_dx: PathBuf,
    /// Walnut DFAO file summed along `k`.
    input_dy: PathBuf,
    /// Picture vector dx.
    dx: u64,
    /// Picture vector dy.
    dy: u64,
    /// Picture dimension.
    size: u32,
    /// Output image file (`.png` or `.ppm`).
    output: PathBuf,
    #[command(flatten)]
    basis: BasisArgs,
    /// Print the value statistics as JSON.
    #[arg(long)]
    json: bool,
    /// Log debug details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let basis = args.basis.basis()?;
    let dx_dfao = load_dfao(&args.input_dx)?;
    let dy_dfao = load_dfao(&args.input_dy)?;
    let field = VectorField::new(&basis, &dx_dfao, &dy_dfao, args.dx, args.dy);
    let rendering = rasterize(&field, args.size)
        .with_context(|| format!("Failed to draw vector ({}, {})", args.dx, args.dy))?;

    let format = write_image(&args.output, &rendering.raster)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), ?format, "image written");

    let output = if args.json {
        StatsOutput::Json
    } else {
        StatsOutput::Lines
    };
    print_stats(&rendering.stats, output)
}
