//! Raven to JavaScript transpilation.
//!
//! Raven is a small surface language that compiles to JavaScript by text
//! rewriting rather than through a syntax tree. A file goes through a fixed
//! sequence of passes:
//!
//! ```text
//! imports ─> templates ─> type hints ─> abbreviations
//!    │                                        │
//!    │      validation <─ privacy <─ rule sweep
//!    │
//!    └─> (each imported module runs the whole sequence first)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use raven_transpile::{FsLoader, SourceUnit, TranspileOptions, Transpiler};
//! use std::path::Path;
//!
//! let unit = SourceUnit::read(Path::new("app/main.rn"))?;
//! let js = Transpiler::new(&FsLoader, TranspileOptions::default()).transpile(&unit)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Limitations
//!
//! Import resolution has no cycle detection. A module that imports itself,
//! directly or through other modules, recurses until the stack is exhausted.
//! The current import chain is tracked only for logging.

pub mod abbrev;
pub mod error;
pub mod hints;
pub mod imports;
pub mod options;
pub mod privacy;
pub mod rules;
pub mod source;
pub mod templates;
pub mod validate;

pub use abbrev::AbbreviationTable;
pub use error::{GeneratedSyntaxError, ResourceKind, TranspileError};
pub use hints::TypeHintTable;
pub use options::TranspileOptions;
pub use source::{
    FsLoader, MODULE_EXTENSION, OUTPUT_EXTENSION, SOURCE_EXTENSION, SourceLoader, SourceUnit,
};

use std::path::{Path, PathBuf};

/// Result of transpiling one unit.
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub code: String,
    /// Annotations stripped from this unit (imports keep their own).
    pub type_hints: TypeHintTable,
    /// Macros defined in this unit (imports keep their own).
    pub abbreviations: AbbreviationTable,
}

/// Runs the pass sequence. Holds no per-file state; every call builds
/// fresh tables.
pub struct Transpiler<'a> {
    loader: &'a dyn SourceLoader,
    options: TranspileOptions,
}

impl<'a> Transpiler<'a> {
    pub fn new(loader: &'a dyn SourceLoader, options: TranspileOptions) -> Self {
        Self { loader, options }
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    /// Transpile `unit` into validated JavaScript.
    pub fn transpile(&self, unit: &SourceUnit) -> Result<String, TranspileError> {
        self.transpile_detailed(unit).map(|t| t.code)
    }

    /// Transpile `unit`, also returning the side tables it produced.
    pub fn transpile_detailed(&self, unit: &SourceUnit) -> Result<Transpiled, TranspileError> {
        let mut chain = Vec::new();
        self.run(unit, &mut chain)
    }

    fn run(
        &self,
        unit: &SourceUnit,
        chain: &mut Vec<PathBuf>,
    ) -> Result<Transpiled, TranspileError> {
        let base = unit.base_path.as_path();
        tracing::debug!(base = %base.display(), depth = chain.len(), "transpiling unit");

        let code = imports::resolve(&unit.text, base, |module, path| {
            self.expand_module(module, path, base, chain)
        })?;
        let code = templates::inline(&code, base, self.loader)?;

        let mut type_hints = TypeHintTable::new();
        let code = hints::strip(&code, &mut type_hints);

        let mut abbreviations = AbbreviationTable::new();
        let code = abbrev::expand(&code, &mut abbreviations);

        let privatize = privacy::has_private_marker(&code);
        let code = rules::rewrite(&code);
        let code = privacy::apply(&code, privatize);

        validate::validate(&code, &self.options)?;

        Ok(Transpiled {
            code,
            type_hints,
            abbreviations,
        })
    }

    fn expand_module(
        &self,
        module: &str,
        path: &Path,
        base: &Path,
        chain: &mut Vec<PathBuf>,
    ) -> Result<String, TranspileError> {
        let text = self
            .loader
            .load(path)
            .map_err(|source| TranspileError::MissingResource {
                kind: ResourceKind::Module,
                name: module.to_string(),
                path: path.to_path_buf(),
                source,
            })?;

        chain.push(path.to_path_buf());
        tracing::debug!(module, chain = ?chain, "expanding import");
        let unit = SourceUnit::new(text + "\n", base);
        let result = self.run(&unit, chain);
        chain.pop();
        result.map(|t| t.code)
    }
}

/// Transpile `source` with file-system access rooted at `base_path` and
/// default options.
pub fn transpile(source: &str, base_path: &Path) -> Result<String, TranspileError> {
    let unit = SourceUnit::new(source, base_path);
    Transpiler::new(&FsLoader, TranspileOptions::default()).transpile(&unit)
}
