//! Rewrite functions for rules whose output depends on what they matched.

use regex::Captures;

/// `fn name(params) = expr` becomes a function returning `expr`.
pub(crate) fn short_fn(caps: &Captures) -> String {
    format!(
        "function {}({}) {{ return {}; }}",
        &caps[1],
        &caps[2],
        caps[3].trim_end()
    )
}

pub(crate) fn xlet(caps: &Captures) -> String {
    statements(&caps[1], "let ")
}

pub(crate) fn xval(caps: &Captures) -> String {
    statements(&caps[1], "const ")
}

pub(crate) fn xvar(caps: &Captures) -> String {
    statements(&caps[1], "var ")
}

/// `xset(target) { a = 1 ... }` assigns each line onto `target`.
pub(crate) fn xset(caps: &Captures) -> String {
    let target = caps[1].trim();
    statements(&caps[2], &format!("{target}."))
}

/// One statement per non-blank body line, in source order.
fn statements(body: &str, prefix: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = line.trim_end_matches(';').trim_end();
            format!("{prefix}{line};")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn init(caps: &Captures) -> String {
    let params = caps.get(1).map_or("()", |m| m.as_str());
    format!("constructor{params} {{")
}

/// Bare `end` exits with status zero; `end = ...` is an assignment and stays.
pub(crate) fn bare_end(caps: &Captures) -> String {
    if !caps[3].is_empty() {
        return caps[0].to_string();
    }
    format!("{}process.exit(0){}", &caps[1], &caps[2])
}

/// `expose { a, b }` exports several names at once.
pub(crate) fn expose_block(caps: &Captures) -> String {
    let names: Vec<&str> = caps[1]
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .collect();
    format!("module.exports = {{ {} }};", names.join(", "))
}

/// `==` and `!=` become strict; operators that already are stay as written.
pub(crate) fn strict_equality(caps: &Captures) -> String {
    match &caps[0] {
        "==" => "===".to_string(),
        "!=" => "!==".to_string(),
        other => other.to_string(),
    }
}
