//! Pictures of automatic 2D sequences.
//!
//! Every pixel `(k, n)` of a square raster is coloured by a value computed
//! from the aligned numeral representations of `k` and `n`, either straight
//! from one DFAO ([`DfaoField`]) or as a sum of DFAO evaluations along a
//! step vector ([`VectorField`]). The value picks one of 32 palette colours.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use autoseq_automaton::{Basis, Dfao};
//! use autoseq_render::{rasterize, write_image, DfaoField};
//!
//! let dfao = Dfao::load(Path::new("T.txt")).expect("load");
//! let field = DfaoField::new(Basis::tribonacci(), &dfao);
//! let rendering = rasterize(&field, 256).expect("rasterize");
//! write_image(Path::new("T.png"), &rendering.raster).expect("write");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod encode;
pub mod error;
pub mod field;
pub mod palette;
pub mod raster;
pub mod writer;

pub use error::RenderError;
pub use field::{DfaoField, Field, VectorField};
pub use palette::{Palette, Rgb};
pub use raster::{rasterize, Raster, Rendering, ValueStats};
pub use writer::{write_image, ImageFormat};
