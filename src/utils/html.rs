//! HTML escaping helpers.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `escape_braces()` - keep `{` from opening a svelte expression

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Entity used for a literal `{` in svelte markup.
pub const BRACE_ENTITY: &str = "&#123;";

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape("<script>"), "&lt;script&gt;");
/// assert_eq!(escape("hello"), "hello"); // No allocation
/// ```
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a value placed inside a quoted attribute of a svelte page.
///
/// Same entities as [`escape`], plus `{` so the framework reads the value
/// as text rather than an expression.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    match escape(s) {
        Cow::Borrowed(b) => escape_braces(b),
        Cow::Owned(o) => Cow::Owned(escape_braces(&o).into_owned()),
    }
}

/// Replace every literal `{` with its numeric entity.
#[inline]
pub fn escape_braces(s: &str) -> Cow<'_, str> {
    if s.contains('{') {
        Cow::Owned(s.replace('{', BRACE_ENTITY))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert!(matches!(escape("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
        assert_eq!(escape("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn test_escape_attr_braces() {
        assert_eq!(escape_attr("{count} <b>"), "&#123;count} &lt;b&gt;");
        assert_eq!(escape_attr("plain"), "plain");
    }

    #[test]
    fn test_escape_braces() {
        assert_eq!(escape_braces("fn main() { }"), "fn main() &#123; }");
        assert!(matches!(escape_braces("none"), Cow::Borrowed(_)));
    }
}
