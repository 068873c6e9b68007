//! Errors raised by the pipeline. Every one of them is fatal.

use std::fmt;
use std::path::PathBuf;

/// What kind of auxiliary file could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Module,
    Template,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Module => f.write_str("imported module"),
            ResourceKind::Template => f.write_str("template file"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
    #[error("{kind} '{name}' not found at '{}'", path.display())]
    MissingResource {
        kind: ResourceKind,
        /// Name as written in the source (dotted module path or relative file).
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    GeneratedSyntax(#[from] GeneratedSyntaxError),
}

/// The rewritten buffer did not parse as JavaScript.
#[derive(Debug, Clone)]
pub struct GeneratedSyntaxError {
    /// 1-based line in the generated text.
    pub line: usize,
    /// 1-based column in the generated text.
    pub column: usize,
    pub message: String,
    /// Short random tag shared with the debug artifact's file name.
    pub identifier: String,
    /// Where the invalid buffer was written, if writing succeeded.
    pub artifact: Option<PathBuf>,
    /// Text of the offending line; only captured in API mode.
    pub offending_line: Option<String>,
    /// Whether `report` paints the message for a terminal.
    pub colored: bool,
}

impl GeneratedSyntaxError {
    /// Human-readable report, colorized unless running in API mode.
    pub fn report(&self) -> String {
        let mut report = format!(
            "ECMA validation error at line {}, column {}: {}\nError identifier: {}",
            self.line, self.column, self.message, self.identifier
        );
        if let Some(line) = &self.offending_line {
            report.push_str("\nBad generated code: ");
            report.push_str(line);
        }
        if self.colored {
            nu_ansi_term::Color::Red.paint(report).to_string()
        } else {
            report
        }
    }
}

impl fmt::Display for GeneratedSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

impl std::error::Error for GeneratedSyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedSyntaxError {
        GeneratedSyntaxError {
            line: 3,
            column: 7,
            message: "Unexpected token".to_string(),
            identifier: "k2x9q".to_string(),
            artifact: None,
            offending_line: None,
            colored: false,
        }
    }

    #[test]
    fn test_plain_report() {
        insta::assert_snapshot!(
            sample().report(),
            @r"
        ECMA validation error at line 3, column 7: Unexpected token
        Error identifier: k2x9q
        "
        );
    }

    #[test]
    fn test_report_with_offending_line() {
        let err = GeneratedSyntaxError {
            offending_line: Some("let a = {b: 1;".to_string()),
            ..sample()
        };
        assert!(err.report().ends_with("\nBad generated code: let a = {b: 1;"));
    }

    #[test]
    fn test_colored_report_wraps_in_escape_codes() {
        let err = GeneratedSyntaxError {
            colored: true,
            ..sample()
        };
        let report = err.report();
        assert!(report.starts_with("\u{1b}["));
        assert!(report.contains("Error identifier: k2x9q"));
    }

    #[test]
    fn test_missing_resource_message() {
        let err = TranspileError::MissingResource {
            kind: ResourceKind::Module,
            name: "util.math".to_string(),
            path: PathBuf::from("src/util/math.rnm"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "imported module 'util.math' not found at 'src/util/math.rnm'"
        );
    }
}
