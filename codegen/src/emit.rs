//! Text buffers for generated scripts, and file output.

use std::fs;
use std::path::Path;

use crate::error::CodegenError;

/// A growing line-oriented script.
#[derive(Debug, Default, Clone)]
pub struct ScriptFile {
    /// The text written so far.
    pub buf: String,
}

impl ScriptFile {
    /// An empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Appends text verbatim.
    pub fn raw(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Returns the finished text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Writes a generated file, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`CodegenError::Io`] if the directory or file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| CodegenError::Io {
        path: path.to_path_buf(),
        source,
    })
}
