//! The ordered rewrite table.
//!
//! Order matters: each rule sees the output of every rule above it. Sugar
//! forms sit above the generic rules that would otherwise half-match them
//! (`short-fn` before `fn`, `say-dotted` before `say`). Rules marked
//! `standalone` skip member calls, so `app.use(..)` keeps its method.

use super::expand;
use super::{Rewrite, RuleSpec};

#[rustfmt::skip]
pub(crate) const RULE_TABLE: &[RuleSpec] = &[
    // Literals and passthrough
    RuleSpec::new("template-literal", r#"(?s)@"(.*?)""#,            Rewrite::Template("`$1`")),
    RuleSpec::new("raw",              r"(?s)\braw\((.*?)\)",         Rewrite::Template("$1")),

    // Functions
    RuleSpec::new("short-fn",         r"\bfn\s+(\w+)\s*\(([^)]*)\)\s*=\s*([^=>\s][^\n;]*);?",
                                                                     Rewrite::With(expand::short_fn)),
    RuleSpec::new("fn",               r"\bfn\s*(\w*)\s*\(",          Rewrite::Template("function $1(")),

    // Output and diagnostics
    RuleSpec::new("say-dotted",       r"\bsay\.(\w+)\s*\(",          Rewrite::Template("console.$1(")).standalone(),
    RuleSpec::new("say",              r"\bsay\s*\(",                 Rewrite::Template("console.log(")).standalone(),
    RuleSpec::new("warn",             r"\bwarn\s*\(",                Rewrite::Template("console.error(")).standalone(),
    RuleSpec::new("use",              r"\buse\s*\(",                 Rewrite::Template("require(")).standalone(),

    // Control flow and exceptions
    RuleSpec::new("die-block",        r"\}\s*die\s*\(",              Rewrite::Template("} catch (")),
    RuleSpec::new("die-chain",        r"\)\s*\.die\s*\(",            Rewrite::Template(").catch(")),
    RuleSpec::new("elif",             r"\belif\b",                   Rewrite::Template("else if")),

    // DOM conveniences
    RuleSpec::new("doc",              r"\bdoc\.",                    Rewrite::Template("document.")),
    RuleSpec::new("win",              r"\bwin\.",                    Rewrite::Template("window.")),
    RuleSpec::new("onready",          r"\bonready\s*\(",             Rewrite::Template(r#"document.addEventListener("DOMContentLoaded","#)).standalone(),
    RuleSpec::new("str",              r"\.str\s*\(\)",               Rewrite::Template(".toString()")),
    RuleSpec::new("get",              r"\bdocument\.get\s*\(",       Rewrite::Template("document.getElementById(")),
    RuleSpec::new("make",             r"\bdocument\.make\s*\(",      Rewrite::Template("document.createElement(")),
    RuleSpec::new("listen",           r"\bdocument\.listen\s*\(",    Rewrite::Template("document.addEventListener(")),
    RuleSpec::new("put",              r"\.put\s*\(",                 Rewrite::Template(".appendChild(")),
    RuleSpec::new("class-name",       r"\.ClassName\b",              Rewrite::Template(".className")),
    RuleSpec::new("inner-html",       r"\.InnerHTML\b",              Rewrite::Template(".innerHTML")),
    RuleSpec::new("ready-event",      r"&ready\b",                   Rewrite::Template(r#""DOMContentLoaded""#)),
    RuleSpec::new("wait",             r"\bwait\s*\(",                Rewrite::Template("setTimeout(")).standalone(),

    // Block expansions
    RuleSpec::new("xlet",             r"\bxlet\s*\{([^}]*)\}",       Rewrite::With(expand::xlet)),
    RuleSpec::new("xval",             r"\bx(?:val|const)\s*\{([^}]*)\}",
                                                                     Rewrite::With(expand::xval)),
    RuleSpec::new("xvar",             r"\bxvar\s*\{([^}]*)\}",       Rewrite::With(expand::xvar)),
    RuleSpec::new("xset",             r"\bxset\s*\(([^)]*)\)\s*\{([^}]*)\}",
                                                                     Rewrite::With(expand::xset)),

    // Declarations
    RuleSpec::new("val",              r"(?m)(^|[^.\w$])val(\s+[\w$\[{])",
                                                                     Rewrite::Template("${1}const${2}")),
    RuleSpec::new("closed-stat",      r"\bclosed\s+stat\b",          Rewrite::Template("static #")),
    RuleSpec::new("open-stat",        r"\bopen\s+stat\b",            Rewrite::Template("static ")),
    RuleSpec::new("closed-async",     r"\bclosed\s+async\b",         Rewrite::Template("async #")),
    RuleSpec::new("open-async",       r"\bopen\s+async\b",           Rewrite::Template("async ")),
    RuleSpec::new("closed",           r"(?m)(^|[^.\w$])closed\s+(\w+)",
                                                                     Rewrite::Template("${1}#${2}")),
    RuleSpec::new("open",             r"(?m)(^|[^.\w$])open\s+(\w+)",
                                                                     Rewrite::Template("${1}${2}")),
    RuleSpec::new("tmp",              r"\btmp\s+(\w+)\b",            Rewrite::Template("class $1")),
    RuleSpec::new("stat",             r"\bstat\s+(\w+)\b",           Rewrite::Template("static $1")),
    RuleSpec::new("self",             r"(?m)(^|[^.\w$])(?:my|self)\.",
                                                                     Rewrite::Template("${1}this.")),
    RuleSpec::new("init",             r"\binit\s*(\([^)]*\))?\s*\{", Rewrite::With(expand::init)),

    // Process exit
    RuleSpec::new("end-call",         r"(?m)(^|[^.\w$])end\s*\(([^)]*)\)",
                                                                     Rewrite::Template("${1}process.exit(${2})")),
    RuleSpec::new("end",              r"(?m)(^|[^.\w$])end\b([ \t]*)(=?)",
                                                                     Rewrite::With(expand::bare_end)),

    // Exports
    RuleSpec::new("expose-block",     r"\bexpose\s*\{([^}]*)\}",     Rewrite::With(expand::expose_block)),
    RuleSpec::new("expose",           r"\bexpose\s+([\w$]+)[ \t]*;?",
                                                                     Rewrite::Template("module.exports.$1 = $1;")),

    // Equality
    RuleSpec::new("strict-equality",  r"!?={2,}|!=",                 Rewrite::With(expand::strict_equality)),
];
