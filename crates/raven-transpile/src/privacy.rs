//! Private-member hygiene, run after the rule sweep.
//!
//! `closed` declarations leave a `#` sigil next to a modifier (`static #`,
//! `async #`). This pass moves the sigil onto the member name and closes
//! any gap after it. When both modifiers are present, `static` comes first.
//! If the file mentions [`PRIVATE_MARKER`] anywhere, every `this.name`
//! access in the file becomes `this.#name`. The trigger is a
//! single file-wide flag; it does not know which members were declared
//! private.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Substring whose presence turns on file-wide member privatization.
pub const PRIVATE_MARKER: &str = "closed";

static STATIC_SIGIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)static\s+#\s*(async\s+)?(\w+\s*\()").unwrap());

static ASYNC_SIGIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)async\s+#\s*(static\s+)?(\w+\s*\()").unwrap());

static SIGIL_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\s+(\w+)").unwrap());

static MEMBER_ACCESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bthis\.(\w+)\b").unwrap());

/// Whether `code` contains the private-declaration marker.
///
/// Checked on the buffer before the rule sweep, since the sweep rewrites the
/// marker itself away.
pub fn has_private_marker(code: &str) -> bool {
    code.contains(PRIVATE_MARKER)
}

/// Apply sigil placement and, when `privatize` is set, member rewriting.
pub fn apply(code: &str, privatize: bool) -> String {
    let code = STATIC_SIGIL.replace_all(code, "static ${1}#$2");
    // `static` must precede `async` in a method header.
    let code = ASYNC_SIGIL.replace_all(&code, |caps: &Captures| {
        let modifiers = if caps.get(1).is_some() {
            "static async"
        } else {
            "async"
        };
        format!("{modifiers} #{}", &caps[2])
    });
    let code = SIGIL_GAP.replace_all(&code, "#$1");
    if privatize {
        MEMBER_ACCESS.replace_all(&code, "this.#$1").into_owned()
    } else {
        code.into_owned()
    }
}
