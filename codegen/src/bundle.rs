//! Zip archives of a standalone Walnut instance.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use chrono::{Datelike, NaiveDateTime, Timelike};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::CodegenError;

/// One file of a [`Bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    /// Path below the bundle root.
    pub path: String,
    /// File contents.
    pub contents: String,
    /// Whether the file gets the executable bits.
    pub executable: bool,
}

impl BundleFile {
    /// A regular file.
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            executable: false,
        }
    }

    /// An executable script.
    pub fn executable(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            executable: true,
            ..Self::new(path, contents)
        }
    }
}

/// A directory tree rooted at `root/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Top-level directory name inside the archive.
    pub root: String,
    /// Directories to create, relative to the root (possibly empty ones).
    pub dirs: Vec<String>,
    /// Files, relative to the root.
    pub files: Vec<BundleFile>,
    /// Modification time stamped on every entry.
    pub modified: NaiveDateTime,
}

impl Bundle {
    /// Writes the bundle as a `.zip` at `path` and returns the archive entry
    /// names in order.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] if the file cannot be created and
    /// [`CodegenError::Archive`] if an entry cannot be written.
    pub fn write_archive(&self, path: &Path) -> Result<Vec<String>, CodegenError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let archive_err = |source: zip::result::ZipError| CodegenError::Archive {
            path: path.to_path_buf(),
            source,
        };
        let mut zip = ZipWriter::new(file);
        let entries = self.append_all(&mut zip).map_err(archive_err)?;
        zip.finish().map_err(archive_err)?;
        Ok(entries)
    }

    fn append_all<W: Write + io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
    ) -> zip::result::ZipResult<Vec<String>> {
        let mut entries = Vec::new();
        let mut dirs = vec![String::new()];
        for dir in &self.dirs {
            // Parents first, so extraction never has to invent a directory.
            let mut prefix = String::new();
            for part in dir.split('/') {
                prefix = if prefix.is_empty() {
                    part.to_string()
                } else {
                    format!("{prefix}/{part}")
                };
                if !dirs.contains(&prefix) {
                    dirs.push(prefix.clone());
                }
            }
        }
        for dir in &dirs {
            let name = if dir.is_empty() {
                format!("{}/", self.root)
            } else {
                format!("{}/{dir}/", self.root)
            };
            zip.add_directory(name.as_str(), self.options(0o755))?;
            entries.push(name);
        }
        for file in &self.files {
            let name = format!("{}/{}", self.root, file.path);
            let mode = if file.executable { 0o755 } else { 0o644 };
            zip.start_file(name.as_str(), self.options(mode))?;
            zip.write_all(file.contents.as_bytes())?;
            entries.push(name);
        }
        Ok(entries)
    }

    fn options(&self, mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(mode)
            .last_modified_time(zip_time(&self.modified))
    }
}

/// Zip timestamps cover 1980 to 2107; anything else gets the format's epoch.
fn zip_time(t: &NaiveDateTime) -> DateTime {
    let field = |v: u32| u8::try_from(v).unwrap_or(0);
    u16::try_from(t.year())
        .ok()
        .and_then(|year| {
            DateTime::from_date_and_time(
                year,
                field(t.month()),
                field(t.day()),
                field(t.hour()),
                field(t.minute()),
                field(t.second()),
            )
            .ok()
        })
        .unwrap_or_default()
}
