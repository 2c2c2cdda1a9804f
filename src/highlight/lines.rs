//! Line tagging for highlighted code.
//!
//! Authors mark a source line with `//[H]` (added) or `//[R]` (removed).
//! After highlighting, the sentinel is still present as text inside its
//! line. Each pass finds the sentinel, sets the class of the enclosing
//! `<span class="line">` wrapper and deletes the sentinel, until none is
//! left. Matching ignores ASCII case.

use crate::utils::html::escape_braces;

/// Opening of a line wrapper, before its class list is closed.
const LINE_OPEN: &str = "<span class=\"line";

/// An in-source marker that tags a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// `//[H]`: the line gains the `added` class.
    Added,
    /// `//[R]`: the line gains the `removed` class.
    Removed,
}

impl Sentinel {
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Added => "//[H]",
            Self::Removed => "//[R]",
        }
    }

    pub const fn class(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// Run one sentinel pass over highlighter output.
///
/// Also disables keyboard focus on the code container and escapes `{` so
/// the page framework does not read it as an expression. Both rewrites
/// are idempotent, so running the two passes back to back is safe.
pub fn mark_lines(html: &str, sentinel: Sentinel) -> String {
    let mut out = html.to_string();

    while let Some(at) = find_ignore_case(&out, sentinel.marker()) {
        if let Some(open) = enclosing_line(&out, at) {
            set_line_class(&mut out, open, sentinel.class());
        }
        // The wrapper edit happens before `at`, so re-locate the marker.
        if let Some(at) = find_ignore_case(&out, sentinel.marker()) {
            out.replace_range(at..at + sentinel.marker().len(), "");
        }
    }

    let out = out.replacen("tabindex=\"0\"", "tabindex=\"-1\"", 1);
    escape_braces(&out).into_owned()
}

/// Byte offset of the first ASCII case-insensitive match of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > bytes.len() {
        return None;
    }
    (0..=bytes.len() - needle.len()).find(|&i| bytes[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Start of the last line wrapper opened before `at`.
fn enclosing_line(html: &str, at: usize) -> Option<usize> {
    let before = &html[..at];
    let mut search_end = before.len();
    while let Some(pos) = before[..search_end].rfind(LINE_OPEN) {
        let next = before.as_bytes().get(pos + LINE_OPEN.len()).copied();
        if matches!(next, Some(b'"') | Some(b' ')) {
            return Some(pos);
        }
        search_end = pos;
    }
    None
}

/// Replace the class list of the wrapper starting at `open` with
/// `line {class}`.
fn set_line_class(html: &mut String, open: usize, class: &str) {
    let attr_start = open + "<span class=\"".len();
    if let Some(len) = html[attr_start..].find('"') {
        html.replace_range(attr_start..attr_start + len, &format!("line {class}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(lines: &[&str]) -> String {
        crate::highlight::frame_lines(lines.iter(), "css-variables")
    }

    #[test]
    fn test_marks_single_line() {
        let html = frame(&["a", "b //[H]", "c"]);
        let out = mark_lines(&html, Sentinel::Added);
        assert!(out.contains("<span class=\"line\">a</span>"));
        assert!(out.contains("<span class=\"line added\">b </span>"));
        assert!(out.contains("<span class=\"line\">c</span>"));
        assert!(!out.contains("//[H]"));
    }

    #[test]
    fn test_marks_every_occurrence() {
        let html = frame(&["a //[R]", "b", "c //[R]"]);
        let out = mark_lines(&html, Sentinel::Removed);
        assert_eq!(out.matches("line removed").count(), 2);
        assert!(out.contains("<span class=\"line\">b</span>"));
    }

    #[test]
    fn test_case_insensitive() {
        let html = frame(&["x //[h]"]);
        let out = mark_lines(&html, Sentinel::Added);
        assert!(out.contains("line added"));
        assert!(!out.to_ascii_uppercase().contains("//[H]"));
    }

    #[test]
    fn test_line_three_added_line_five_removed() {
        let html = frame(&["1", "2", "3 //[H]", "4", "5 //[R]"]);
        let out = mark_lines(&mark_lines(&html, Sentinel::Added), Sentinel::Removed);

        let lines: Vec<&str> = out.split('\n').collect();
        assert!(lines[2].contains("<span class=\"line added\">3 </span>"));
        assert!(lines[4].contains("<span class=\"line removed\">5 </span>"));
        assert!(!out.contains("//[H]") && !out.contains("//[R]"));
    }

    #[test]
    fn test_second_pass_wins_on_same_line() {
        let html = frame(&["a", "b //[H] //[R]"]);
        let out = mark_lines(&mark_lines(&html, Sentinel::Added), Sentinel::Removed);
        assert!(out.contains("<span class=\"line\">a</span>"));
        assert!(out.contains("<span class=\"line removed\">b  </span>"));
        assert!(!out.contains("line added"));
    }

    #[test]
    fn test_marker_inside_nested_spans() {
        let html = "<pre tabindex=\"0\"><code><span class=\"line\"><a-c>//[H] note</a-c></span></code></pre>";
        let out = mark_lines(html, Sentinel::Added);
        assert_eq!(
            out,
            "<pre tabindex=\"-1\"><code><span class=\"line added\"><a-c> note</a-c></span></code></pre>"
        );
    }

    #[test]
    fn test_rewrites_without_markers() {
        let html = frame(&["fn main() {", "}"]);
        let out = mark_lines(&html, Sentinel::Added);
        assert!(out.contains("tabindex=\"-1\""));
        assert!(out.contains("fn main() &#123;"));
        assert!(!out.contains('{'));
    }

    #[test]
    fn test_marker_outside_wrapper_is_stripped() {
        let out = mark_lines("plain //[H] text", Sentinel::Added);
        assert_eq!(out, "plain  text");
    }
}
