//! Pixel buffers and the rasterization loop.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::error::RenderError;
use crate::field::Field;
use crate::palette::{Palette, Rgb};

/// A row-major RGB pixel buffer, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// A black raster.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Sets a pixel; out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Reads a pixel.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks(0) panics; a zero-width raster has no pixels anyway.
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

/// Range and distinct values seen while rasterizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueStats {
    min: Option<i64>,
    max: Option<i64>,
    values: BTreeSet<i64>,
}

impl ValueStats {
    /// Records one value.
    pub fn record(&mut self, value: i64) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.values.insert(value);
    }

    /// Smallest value seen.
    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    /// Largest value seen.
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// Distinct values, ascending.
    #[must_use]
    pub fn values(&self) -> &BTreeSet<i64> {
        &self.values
    }
}

impl fmt::Display for ValueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<i64>| v.map_or_else(|| "none".to_string(), |v| v.to_string());
        let values: Vec<String> = self.values.iter().map(i64::to_string).collect();
        writeln!(f, "min value : {}", show(self.min))?;
        writeln!(f, "max value : {}", show(self.max))?;
        write!(f, "values : [{}]", values.join(", "))
    }
}

/// A finished picture and the statistics of the values behind it.
#[derive(Debug, Clone)]
pub struct Rendering {
    /// The coloured pixels.
    pub raster: Raster,
    /// Values seen, before palette reduction.
    pub stats: ValueStats,
}

/// Colours a `size × size` raster from `field`.
///
/// Pixel `(x, y) = (n, size - k - 1)` gets the palette colour of
/// `field.value(k, n)`, so `k` grows upwards and `n` to the right.
///
/// # Errors
///
/// Returns [`RenderError::EmptyRaster`] for `size == 0`, otherwise the first
/// error reported by the field.
pub fn rasterize<F: Field + ?Sized>(field: &F, size: u32) -> Result<Rendering, RenderError> {
    if size == 0 {
        return Err(RenderError::EmptyRaster);
    }
    let palette = Palette::default();
    let mut raster = Raster::new(size, size);
    let mut stats = ValueStats::default();
    for k in 0..size {
        for n in 0..size {
            let v = field.value(u64::from(k), u64::from(n))?;
            stats.record(v);
            raster.put(n, size - k - 1, palette.color_for(v));
        }
    }
    debug!(size, distinct = stats.values().len(), "rasterized");
    Ok(Rendering { raster, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `k - n`.
    struct Diff;

    impl Field for Diff {
        fn value(&self, k: u64, n: u64) -> Result<i64, RenderError> {
            Ok(k as i64 - n as i64)
        }
    }

    struct FailsAt(u64, u64);

    impl Field for FailsAt {
        fn value(&self, k: u64, n: u64) -> Result<i64, RenderError> {
            if (k, n) == (self.0, self.1) {
                Err(RenderError::Overflow { k, n })
            } else {
                Ok(0)
            }
        }
    }

    #[test]
    fn orientation_puts_k_upwards() {
        let rendering = rasterize(&Diff, 4).unwrap();
        let palette = Palette::default();
        // bottom-left is (k, n) = (0, 0)
        assert_eq!(rendering.raster.get(0, 3), Some(palette.color_for(0)));
        // top-left is k = 3, n = 0
        assert_eq!(rendering.raster.get(0, 0), Some(palette.color_for(3)));
        // bottom-right is k = 0, n = 3
        assert_eq!(rendering.raster.get(3, 3), Some(palette.color_for(-3)));
    }

    #[test]
    fn stats_cover_every_pixel() {
        let rendering = rasterize(&Diff, 4).unwrap();
        assert_eq!(rendering.stats.min(), Some(-3));
        assert_eq!(rendering.stats.max(), Some(3));
        assert_eq!(rendering.stats.values().len(), 7);
        assert_eq!(
            rendering.stats.to_string(),
            "min value : -3\nmax value : 3\nvalues : [-3, -2, -1, 0, 1, 2, 3]"
        );
    }

    #[test]
    fn empty_raster_is_rejected() {
        assert!(matches!(rasterize(&Diff, 0), Err(RenderError::EmptyRaster)));
    }

    #[test]
    fn first_failure_aborts() {
        assert!(matches!(
            rasterize(&FailsAt(2, 1), 4),
            Err(RenderError::Overflow { k: 2, n: 1 })
        ));
    }

    #[test]
    fn rows_are_top_down() {
        let mut raster = Raster::new(2, 3);
        raster.put(1, 2, Rgb(1, 2, 3));
        raster.put(5, 5, Rgb(9, 9, 9));
        let rows: Vec<&[Rgb]> = raster.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[Rgb::default(), Rgb(1, 2, 3)][..]);
    }
}
