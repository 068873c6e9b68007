//! `abbrev` macros.
//!
//! Two definition forms are recognised:
//!
//! ```text
//! abbrev {
//!     log = console.log
//!     PI2 = 6.2831
//! }
//! abbrev out = process.stdout
//! ```
//!
//! Definitions are removed from the buffer, then applied one after another
//! in definition order with whole-word matching. Expansion is sequential, so
//! a macro whose replacement spells an earlier-defined macro's name is only
//! expanded further if that macro comes later in the table.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"abbrev\s*\{([^}]*)\}").unwrap());

static INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"abbrev\s+(\w+)\s*=\s*([^\n;]+);?").unwrap());

/// Macro name to replacement text, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: Vec<(String, String)>,
}

impl AbbreviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Returns `false` (and keeps the old one) if `name`
    /// is already defined.
    pub fn define(&mut self, name: &str, replacement: &str) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.entries.push((name.to_string(), replacement.to_string()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }

    /// Substitute every macro over `code`, one table entry at a time.
    pub fn apply(&self, code: &str) -> String {
        let mut code = code.to_string();
        for (name, replacement) in &self.entries {
            let word = Regex::new(&format!(r"\b{}\b", regex::escape(name)))
                .expect("escaped macro name is a valid pattern");
            code = word
                .replace_all(&code, NoExpand(replacement))
                .into_owned();
        }
        code
    }
}

/// Capture all definitions into `table`, strip them, and expand the rest.
pub fn expand(code: &str, table: &mut AbbreviationTable) -> String {
    // (source offset, name, replacement), sorted so the table follows the
    // order definitions appear in the file.
    let mut definitions: Vec<(usize, String, String)> = Vec::new();
    let mut removals: Vec<String> = Vec::new();

    if let Some(block) = BLOCK.captures(code) {
        let whole = block.get(0).expect("group 0 always participates");
        let body = block.get(1).expect("block body group");
        let mut offset = body.start();
        for line in body.as_str().split('\n') {
            let parts: Vec<&str> = line.split('=').map(str::trim).collect();
            if let [name, replacement] = parts.as_slice()
                && !name.is_empty()
            {
                definitions.push((offset, name.to_string(), replacement.to_string()));
            }
            offset += line.len() + 1;
        }
        removals.push(whole.as_str().to_string());
    }

    for inline in INLINE.captures_iter(code) {
        let whole = inline.get(0).expect("group 0 always participates");
        definitions.push((
            whole.start(),
            inline[1].to_string(),
            inline[2].trim().to_string(),
        ));
        removals.push(whole.as_str().to_string());
    }

    definitions.sort_by_key(|(offset, _, _)| *offset);
    for (_, name, replacement) in &definitions {
        if !table.define(name, replacement) {
            tracing::debug!(name, "ignoring duplicate abbreviation");
        }
    }

    let mut code = code.to_string();
    for removal in removals {
        code = code.replace(&removal, "");
    }
    table.apply(&code)
}
