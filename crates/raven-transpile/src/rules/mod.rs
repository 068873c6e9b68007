//! Token rewriting: the ordered rule sweep.
//!
//! The table in [`table`] is plain data (name, pattern, rewrite). It is
//! compiled once into [`RewriteRule`]s and applied front to back, each rule
//! replacing every match in the buffer produced by the rule before it.

mod expand;
mod table;

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// How a rule turns a match into replacement text.
#[derive(Clone, Copy)]
pub enum Rewrite {
    /// A `regex` replacement template (`$1`, `${name}`).
    Template(&'static str),
    /// Computed from the captures.
    With(fn(&Captures) -> String),
}

/// One uncompiled row of the rule table.
#[derive(Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub rewrite: Rewrite,
    /// Skip matches that directly follow a `.`, i.e. member calls like
    /// `app.use(...)`.
    pub standalone: bool,
}

impl RuleSpec {
    pub const fn new(name: &'static str, pattern: &'static str, rewrite: Rewrite) -> Self {
        Self {
            name,
            pattern,
            rewrite,
            standalone: false,
        }
    }

    pub const fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }
}

/// A compiled rule.
pub struct RewriteRule {
    pub name: &'static str,
    pub pattern: Regex,
    rewrite: Rewrite,
    standalone: bool,
}

impl RewriteRule {
    fn compile(spec: &RuleSpec) -> Self {
        let pattern = Regex::new(spec.pattern)
            .unwrap_or_else(|e| panic!("rewrite rule '{}' has a bad pattern: {e}", spec.name));
        Self {
            name: spec.name,
            pattern,
            rewrite: spec.rewrite,
            standalone: spec.standalone,
        }
    }

    /// Replace every match of this rule in `code`.
    pub fn apply(&self, code: &str) -> String {
        if self.standalone {
            return self.apply_standalone(code);
        }
        match self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(code, template).into_owned(),
            Rewrite::With(f) => self
                .pattern
                .replace_all(code, |caps: &Captures| f(caps))
                .into_owned(),
        }
    }

    /// Like `apply`, but leaves matches preceded by `.` untouched. The
    /// check looks at the original text, so adjacent matches such as
    /// `say(say(1))` are all seen.
    fn apply_standalone(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len());
        let mut last = 0;
        for caps in self.pattern.captures_iter(code) {
            let Some(m) = caps.get(0) else { continue };
            if code[..m.start()].ends_with('.') {
                continue;
            }
            out.push_str(&code[last..m.start()]);
            match self.rewrite {
                Rewrite::Template(template) => caps.expand(template, &mut out),
                Rewrite::With(f) => out.push_str(&f(&caps)),
            }
            last = m.end();
        }
        out.push_str(&code[last..]);
        out
    }
}

static RULES: LazyLock<Vec<RewriteRule>> =
    LazyLock::new(|| table::RULE_TABLE.iter().map(RewriteRule::compile).collect());

/// The compiled rules, in application order.
pub fn rules() -> &'static [RewriteRule] {
    &RULES
}

/// Index of a rule in the sweep.
pub fn position(name: &str) -> Option<usize> {
    rules().iter().position(|r| r.name == name)
}

/// Run the whole sweep over `code`.
pub fn rewrite(code: &str) -> String {
    rules().iter().fold(code.to_string(), |code, rule| {
        let next = rule.apply(&code);
        if next != code {
            tracing::trace!(rule = rule.name, "rule rewrote buffer");
        }
        next
    })
}
