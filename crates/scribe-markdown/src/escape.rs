//! Escaping helpers for generated markup.

use std::borrow::Cow;

/// Escape angle brackets in code content.
///
/// Only `<` and `>` are replaced. Ampersands and quotes pass through so that
/// code bodies keep their characters exactly, apart from the two brackets.
///
/// # Examples
///
/// ```
/// use scribe_markdown::escape_code;
///
/// assert_eq!(escape_code("Vec<u8>"), "Vec&lt;u8&gt;");
/// assert_eq!(escape_code("a && b"), "a && b");
/// ```
pub fn escape_code(code: &str) -> Cow<'_, str> {
    if !code.contains(['<', '>']) {
        return Cow::Borrowed(code);
    }
    let mut out = String::with_capacity(code.len() + 8);
    for c in code.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape a value for use inside a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
