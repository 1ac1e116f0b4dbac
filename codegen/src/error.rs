//! Generator errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while generating or archiving scripts.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A file or directory could not be written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A zip archive entry could not be written.
    #[error("cannot archive {path}: {source}")]
    Archive {
        /// Archive being written.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },
    /// An empty or reversed range of `k`.
    #[error("empty range: from {from} to {to}")]
    EmptyRange {
        /// First value.
        from: u32,
        /// Last value.
        to: u32,
    },
    /// A parameter that must be positive was zero.
    #[error("{0} must be at least 1")]
    NotPositive(&'static str),
    /// A name that is not a Walnut identifier.
    #[error("invalid name {0:?}: expected ASCII letters, digits or underscores")]
    InvalidName(String),
}
