//! Writes rasters to image files, picking the format from the extension.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::encode::{write_png, write_ppm};
use crate::error::RenderError;
use crate::raster::Raster;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// Binary portable pixmap.
    Ppm,
}

impl ImageFormat {
    /// Format named by the path's extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "ppm" => Some(Self::Ppm),
            _ => None,
        }
    }
}

/// Writes `raster` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedFormat`] for unknown extensions and
/// [`RenderError::Io`] if the file cannot be written.
pub fn write_image(path: &Path, raster: &Raster) -> Result<ImageFormat, RenderError> {
    let format = ImageFormat::from_path(path)
        .ok_or_else(|| RenderError::UnsupportedFormat(path.to_path_buf()))?;
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let out = BufWriter::new(File::create(path).map_err(io_err)?);
    let written = match format {
        ImageFormat::Png => write_png(raster, out),
        ImageFormat::Ppm => write_ppm(raster, out),
    };
    written.map_err(io_err)?;
    debug!(path = %path.display(), ?format, "image written");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("a.PPM")), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_path(Path::new("a.jpg")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn unknown_extension_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("out.gif");
        let err = write_image(&path, &Raster::new(1, 1)).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.ppm");
        assert_eq!(write_image(&path, &Raster::new(2, 2)).unwrap(), ImageFormat::Ppm);
        assert_eq!(fs::read(&path).unwrap().len(), "P6\n2 2\n255\n".len() + 12);
    }
}
