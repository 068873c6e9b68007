//! `import dotted.path;` resolution.
//!
//! Each import statement is replaced by the fully transpiled text of the
//! module it names. Replacement targets the literal statement text, so two
//! identical statements in one file are both replaced in the same step.

use crate::error::TranspileError;
use crate::source::MODULE_EXTENSION;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static IMPORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bimport\s+([\w.]+)\s*;?").unwrap());

/// File a dotted module path refers to, relative to `base`.
pub fn module_path(base: &Path, module: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in module.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.set_extension(MODULE_EXTENSION);
    path
}

/// Replace each import statement in `code` with `expand(module, path)`.
///
/// Statements are collected before any replacement happens, and `expand` is
/// called once per statement found, duplicates included.
pub fn resolve<F>(code: &str, base: &Path, mut expand: F) -> Result<String, TranspileError>
where
    F: FnMut(&str, &Path) -> Result<String, TranspileError>,
{
    let statements: Vec<(String, String)> = IMPORT
        .captures_iter(code)
        .map(|c| (c[0].to_string(), c[1].to_string()))
        .collect();

    let mut code = code.to_string();
    for (statement, module) in statements {
        let path = module_path(base, &module);
        let expanded = expand(&module, &path)?;
        code = code.replace(&statement, &expanded);
    }
    Ok(code)
}
