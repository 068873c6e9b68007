//! Source units and the file-read capability the pipeline depends on.

use std::io;
use std::path::{Path, PathBuf};

/// Extension of Raven entry files.
pub const SOURCE_EXTENSION: &str = "rn";

/// Extension appended to dotted module paths by `import`.
pub const MODULE_EXTENSION: &str = "rnm";

/// Extension of emitted JavaScript files.
pub const OUTPUT_EXTENSION: &str = "js";

/// One file's text together with the directory its relative paths resolve
/// against.
///
/// A unit is never modified; every pass produces a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub text: String,
    pub base_path: PathBuf,
}

impl SourceUnit {
    pub fn new(text: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            base_path: base_path.into(),
        }
    }

    /// Read an entry file. Its parent directory becomes the base path.
    pub fn read(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let base_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { text, base_path })
    }
}

/// Reads auxiliary files (modules and templates) on behalf of the pipeline.
pub trait SourceLoader {
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Loader backed by the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
