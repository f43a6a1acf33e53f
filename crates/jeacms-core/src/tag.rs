//! Tag syntax: `{{{`, a name, then `}}}`.
//!
//! The name is any non-empty run of characters other than `}` and is trimmed
//! of surrounding whitespace before use. There is no escape for literal
//! delimiters; text that does not form a complete tag is left untouched.
//!
//! This module owns the two text-facing phases of a render:
//! - [`extract_names`] finds the distinct names present in the source text
//! - [`splice`] replaces every occurrence of one name with its replacement
//!
//! Resolving a name to its replacement lives in [`crate::render`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\{([^}]+)\}\}\}").expect("tag pattern compiles"));

// Like `TAG` but also matches `{{{}}}`, so the blank name can be spliced.
static SPLICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\{[^}]*\}\}\}").expect("splice pattern compiles"));

/// Collect the distinct tag names in `text`, in resolution order.
///
/// The blank name always comes first so that `{{{}}}` and `{{{ }}}` are
/// cleared before anything else, followed by each distinct non-blank name in
/// order of first appearance.
pub fn extract_names(text: &str) -> Vec<&str> {
    let mut names = vec![""];
    for caps in TAG.captures_iter(text) {
        let name = caps.get(1).map_or("", |m| m.as_str().trim());
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Replace every `name` tag in `text` with `replacement`, inserted verbatim.
///
/// A `name` tag is `{{{`, optional whitespace, exactly `name`, optional
/// whitespace, `}}}`. The name is compared literally, so names containing
/// `.` or `(` only match themselves.
pub fn splice(text: &str, name: &str, replacement: &str) -> String {
    SPLICE
        .replace_all(text, |caps: &Captures| {
            let tag = &caps[0];
            match opening_of(tag, name) {
                Some(start) => [&tag[..start], replacement].concat(),
                None => tag.to_string(),
            }
        })
        .into_owned()
}

// `tag` is one `SPLICE` match. The leftmost `{{{` whose trimmed remainder is
// `name` opens the tag; anything before it stays literal, as in `{{{{ a }}}`.
fn opening_of(tag: &str, name: &str) -> Option<usize> {
    let close = tag.len() - 3;
    (0..close)
        .filter(|&i| tag.is_char_boundary(i) && tag[i..].starts_with("{{{"))
        .find(|&i| tag[i + 3..close].trim() == name)
}
