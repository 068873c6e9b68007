//! Inline type annotations (`|| name -> Type`).
//!
//! Annotations are cut out of the buffer and kept in a [`TypeHintTable`].
//! Nothing downstream reads the table yet; it is returned alongside the
//! generated code so callers can build on it.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TYPE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\|\s*(\w+)\s*->\s*([\w\[\]]+)").unwrap());

/// Declared types keyed by variable name. First declaration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHintTable {
    hints: HashMap<String, String>,
}

impl TypeHintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name -> ty` unless `name` already has a type.
    pub fn record(&mut self, name: &str, ty: &str) {
        self.hints
            .entry(name.to_string())
            .or_insert_with(|| ty.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.hints.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hints.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Remove every annotation span from `code`, recording each one in `table`.
pub fn strip(code: &str, table: &mut TypeHintTable) -> String {
    let found: Vec<(String, String, String)> = TYPE_HINT
        .captures_iter(code)
        .map(|c| (c[0].to_string(), c[1].to_string(), c[2].to_string()))
        .collect();

    let mut code = code.to_string();
    for (span, name, ty) in found {
        table.record(&name, &ty);
        code = code.replace(&span, "");
    }
    code
}
