//! Rendering errors.

use std::path::PathBuf;

use autoseq_automaton::{EvalError, NumerationError};
use thiserror::Error;

/// Failures while computing or writing a picture.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A coordinate could not be represented.
    #[error("coordinate ({k}, {n}): {source}")]
    Numeration {
        /// Row coordinate.
        k: u64,
        /// Column coordinate.
        n: u64,
        /// Underlying numeration failure.
        #[source]
        source: NumerationError,
    },
    /// The DFAO could not be run on a coordinate.
    #[error("coordinate ({k}, {n}): {source}")]
    Eval {
        /// Row coordinate.
        k: u64,
        /// Column coordinate.
        n: u64,
        /// Underlying evaluation failure.
        #[source]
        source: EvalError,
    },
    /// A summed field value left `i64`.
    #[error("value overflow at coordinate ({k}, {n})")]
    Overflow {
        /// Row coordinate.
        k: u64,
        /// Column coordinate.
        n: u64,
    },
    /// The raster has no pixels.
    #[error("raster size must be positive")]
    EmptyRaster,
    /// The output extension names no supported format.
    #[error("unsupported image format for {0} (expected .png or .ppm)")]
    UnsupportedFormat(PathBuf),
    /// The image could not be written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
