//! Round-trip validation of generated JavaScript.
//!
//! The final buffer is parsed as a CommonJS script with oxc, then checked
//! for early errors. A failure is fatal: the buffer is written to a debug
//! artifact tagged with a random identifier and a [`GeneratedSyntaxError`]
//! is raised.

use crate::error::{GeneratedSyntaxError, TranspileError};
use crate::options::TranspileOptions;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Length of the identifier that ties an error to its artifact.
const IDENTIFIER_LEN: usize = 5;

/// First error reported by the parser or the early-error check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFault {
    /// 1-based.
    pub line: usize,
    /// 1-based, counted in characters.
    pub column: usize,
    pub message: String,
}

/// Parse `code` and report the first syntax error, if any.
///
/// Early errors (such as a private name no enclosing class declares) count
/// as syntax errors, the same as a JavaScript engine loading the file.
pub fn check(code: &str) -> Result<(), SyntaxFault> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::cjs()).parse();
    if let Some(diagnostic) = ret.errors.first() {
        return Err(fault(code, diagnostic));
    }

    let semantic = SemanticBuilder::new()
        .with_check_syntax_error(true)
        .build(&ret.program);
    match semantic.errors.first() {
        Some(diagnostic) => Err(fault(code, diagnostic)),
        None => Ok(()),
    }
}

fn fault(code: &str, diagnostic: &OxcDiagnostic) -> SyntaxFault {
    let offset = diagnostic
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map_or(code.len(), |label| label.offset());
    let (line, column) = line_column(code, offset);
    SyntaxFault {
        line,
        column,
        message: diagnostic.message.to_string(),
    }
}

/// Validate `code`, writing a debug artifact and raising on failure.
pub fn validate(code: &str, options: &TranspileOptions) -> Result<(), TranspileError> {
    let fault = match check(code) {
        Ok(()) => return Ok(()),
        Err(fault) => fault,
    };

    let identifier = random_identifier();
    let artifact = match write_artifact(code, &identifier, &options.resolved_artifact_dir()) {
        Ok(path) => {
            if options.reveal_artifact {
                tracing::warn!(
                    path = %path.display(),
                    %identifier,
                    "invalid output written for inspection"
                );
            } else {
                tracing::debug!(path = %path.display(), %identifier, "invalid output written");
            }
            Some(path)
        }
        Err(e) => {
            tracing::warn!(error = %e, %identifier, "could not write debug artifact");
            None
        }
    };

    let offending_line = options
        .api_mode
        .then(|| line_text(code, fault.line).to_string());

    Err(GeneratedSyntaxError {
        line: fault.line,
        column: fault.column,
        message: fault.message,
        identifier,
        artifact,
        offending_line,
        colored: !options.api_mode,
    }
    .into())
}

fn random_identifier() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(IDENTIFIER_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

fn write_artifact(code: &str, identifier: &str, dir: &Path) -> std::io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{identifier}-"))
        .suffix("-debug.js")
        .tempfile_in(dir)?;
    file.write_all(code.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// 1-based line and column of a byte offset.
fn line_column(code: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(code.len());
    while !code.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &code[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Text of the 1-based `line`, found by counting newlines.
fn line_text(code: &str, line: usize) -> &str {
    code.split('\n')
        .nth(line.saturating_sub(1))
        .map_or("", |l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> TranspileOptions {
        TranspileOptions::new()
            .reveal_artifact(false)
            .artifact_dir(dir.path())
    }

    #[test]
    fn test_valid_code_passes() {
        assert_eq!(check("const a = 1;\nconsole.log(a === 1);"), Ok(()));
        assert_eq!(check("module.exports = { a };\nprocess.exit(0);"), Ok(()));
    }

    #[test]
    fn test_fault_position() {
        let fault = check("let a = 1;\nlet b = {c: 1;\n").unwrap_err();
        assert_eq!(fault.line, 2);
        assert!(fault.column > 1);
        assert!(!fault.message.is_empty());
    }

    #[test]
    fn test_undeclared_private_name_is_an_early_error() {
        let code = "class A {\n  #n = 0;\n  hi() { return 1; }\n  \
                    go() { return this.#hi(); }\n}\n";
        let fault = check(code).unwrap_err();
        assert_eq!(fault.line, 4);
        assert!(fault.message.contains("hi"));
        assert_eq!(check(&code.replace("this.#hi()", "this.hi()")), Ok(()));
    }

    #[test]
    fn test_line_column() {
        let code = "ab\ncdé\nf";
        assert_eq!(line_column(code, 0), (1, 1));
        assert_eq!(line_column(code, 3), (2, 1));
        assert_eq!(line_column(code, 5), (2, 3));
        assert_eq!(line_column(code, code.len()), (3, 2));
    }

    #[test]
    fn test_line_text() {
        let code = "one\r\ntwo\nthree";
        assert_eq!(line_text(code, 1), "one");
        assert_eq!(line_text(code, 3), "three");
        assert_eq!(line_text(code, 9), "");
    }

    #[test]
    fn test_failure_writes_artifact_with_buffer() {
        let dir = TempDir::new().unwrap();
        let code = "function f() {\n  return 1;\n";
        let err = validate(code, &options(&dir)).unwrap_err();
        let TranspileError::GeneratedSyntax(err) = err else {
            panic!("expected a syntax error");
        };

        assert_eq!(err.identifier.len(), IDENTIFIER_LEN);
        let artifact = err.artifact.clone().expect("artifact written");
        assert!(artifact.starts_with(dir.path()));
        let name = artifact.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&err.identifier));
        assert!(name.ends_with("-debug.js"));
        assert_eq!(std::fs::read_to_string(&artifact).unwrap(), code);
        assert!(err.colored);
        assert!(err.offending_line.is_none());
    }

    #[test]
    fn test_api_mode_quotes_line_and_disables_color() {
        let dir = TempDir::new().unwrap();
        let code = "const ok = 1;\nconst = 2;\n";
        let err = validate(code, &options(&dir).api_mode(true)).unwrap_err();
        let TranspileError::GeneratedSyntax(err) = err else {
            panic!("expected a syntax error");
        };

        assert_eq!(err.line, 2);
        assert_eq!(err.offending_line.as_deref(), Some("const = 2;"));
        assert!(!err.colored);
        let report = err.report();
        assert!(report.contains(&format!("Error identifier: {}", err.identifier)));
        assert!(report.ends_with("Bad generated code: const = 2;"));
    }
}
