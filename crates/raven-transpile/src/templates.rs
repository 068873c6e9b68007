//! `template("path")` inlining.
//!
//! The named file is read relative to the base path and its content is
//! spliced in as a backtick literal. Inlined content is not scanned for
//! further template calls. `rhtml("path")` is accepted as an older spelling.

use crate::error::{ResourceKind, TranspileError};
use crate::source::SourceLoader;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(?:template|rhtml)\("(.*?)"\)"#).unwrap());

pub fn inline(
    code: &str,
    base: &Path,
    loader: &dyn SourceLoader,
) -> Result<String, TranspileError> {
    let calls: Vec<(String, String)> = TEMPLATE
        .captures_iter(code)
        .map(|c| (c[0].to_string(), c[1].to_string()))
        .collect();

    let mut code = code.to_string();
    for (call, relative) in calls {
        let path = base.join(&relative);
        let content = loader
            .load(&path)
            .map_err(|source| TranspileError::MissingResource {
                kind: ResourceKind::Template,
                name: relative.clone(),
                path: path.clone(),
                source,
            })?;
        tracing::debug!(template = %relative, bytes = content.len(), "inlining template");
        code = code.replace(&call, &format!("`{content}`"));
    }
    Ok(code)
}
