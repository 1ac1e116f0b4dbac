//! `drawtri`: draws a tri-automatic 2D sequence.
//!
//! Pixel `(n, size - k - 1)` is coloured by the DFAO output on the aligned
//! Tribonacci representations of `k` and `n`. Nothing is printed unless
//! `--json` asks for the value statistics.
//!
//! **Usage:**
//! ```
//! drawtri <input> <size> <output> [--lookahead N] [--json] [-v]
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
use autoseq_render::{rasterize, write_image, DfaoField};
use clap::Parser;
use tracing::info;

/// Draw a tri-automatic 2D sequence.
#[derive(Parser)]
#[command(name = "drawtri", about = "Draw a tri-automatic 2D sequence")]
struct Args {
    /// Walnut DFAO file.
    input: PathBuf,
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
    let dfao = load_dfao(&args.input)?;
    let field = DfaoField::new(&basis, &dfao);
    let rendering = rasterize(&field, args.size)
        .with_context(|| format!("Failed to draw {}", args.input.display()))?;

    let format = write_image(&args.output, &rendering.raster)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), ?format, "image written");

    let output = if args.json {
        StatsOutput::Json
    } else {
        StatsOutput::Silent
    };
    print_stats(&rendering.stats, output)
}
