//! Tree-sitter highlighting via arborium.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use super::{HighlightError, Highlighter, frame_lines};
use crate::debug;
use crate::utils::html::escape;

/// Languages rendered as escaped text, without a grammar.
const PLAIN_LANGUAGES: &[&str] = &["", "text", "plain", "plaintext", "txt"];

/// Highlighter backed by arborium's bundled tree-sitter grammars.
///
/// The underlying highlighter is created on first use. Languages are
/// probed once and remembered, so repeated loads are free.
pub struct ArboriumHighlighter {
    inner: Mutex<Option<arborium::Highlighter>>,
    loaded: Mutex<FxHashSet<String>>,
}

impl ArboriumHighlighter {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
            loaded: Mutex::new(FxHashSet::default()),
        }
    }

    fn highlight_raw(&self, lang: &str, code: &str) -> Result<String, String> {
        let mut guard = self.inner.lock();
        let hl = guard.get_or_insert_with(arborium::Highlighter::new);
        hl.highlight(lang, code).map_err(|e| e.to_string())
    }
}

impl Default for ArboriumHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ArboriumHighlighter {
    async fn load_language(&self, lang: &str) -> Result<(), HighlightError> {
        let lang = normalize_language(lang);
        if is_plain(&lang) || self.loaded.lock().contains(&lang) {
            return Ok(());
        }

        self.highlight_raw(&lang, "")
            .map_err(|_| HighlightError::UnknownLanguage(lang.clone()))?;

        debug!("highlight"; "loaded grammar `{}`", lang);
        self.loaded.lock().insert(lang);
        Ok(())
    }

    fn render(&self, code: &str, lang: &str, theme: &str) -> Result<String, HighlightError> {
        let lang = normalize_language(lang);
        if is_plain(&lang) {
            return Ok(frame_lines(code.split('\n').map(escape), theme));
        }

        let html = self
            .highlight_raw(&lang, code)
            .map_err(|message| HighlightError::Render {
                lang: lang.clone(),
                message,
            })?;

        Ok(frame_lines(split_balanced_lines(&html), theme))
    }
}

fn is_plain(lang: &str) -> bool {
    PLAIN_LANGUAGES.contains(&lang)
}

/// Normalize common language aliases to arborium-recognized names.
fn normalize_language(lang: &str) -> String {
    let lang = lang.trim().to_lowercase();
    match lang.as_str() {
        "js" | "mjs" | "cjs" => "javascript".to_string(),
        "ts" => "typescript".to_string(),
        "py" => "python".to_string(),
        "rb" => "ruby".to_string(),
        "rs" => "rust".to_string(),
        "sh" | "bash" | "zsh" | "shell" | "console" => "bash".to_string(),
        "yml" => "yaml".to_string(),
        "md" => "markdown".to_string(),
        "c++" | "cc" | "cxx" => "cpp".to_string(),
        "c#" | "csharp" => "c_sharp".to_string(),
        "jinja" => "jinja2".to_string(),
        _ => lang,
    }
}

/// Split highlighted HTML at newlines so that every line is balanced.
///
/// Elements open across a newline are closed at the end of the line and
/// reopened at the start of the next one.
fn split_balanced_lines(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    // Full opening tags of the elements currently open.
    let mut open: Vec<&str> = Vec::new();

    let mut rest = html;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
        {
            let tag = &rest[..=end];
            if tag.starts_with("</") {
                open.pop();
            } else if !tag.ends_with("/>") && !tag.starts_with("<!") {
                open.push(tag);
            }
            line.push_str(tag);
            rest = &rest[end + 1..];
            continue;
        }

        if c == '\n' {
            for tag in open.iter().rev() {
                line.push_str(&format!("</{}>", tag_name(tag)));
            }
            lines.push(std::mem::take(&mut line));
            for tag in &open {
                line.push_str(tag);
            }
        } else {
            line.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    lines.push(line);
    lines
}

/// `<a-k class="x">` -> `a-k`
fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<').trim_end_matches('>');
    inner
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalization() {
        assert_eq!(normalize_language("js"), "javascript");
        assert_eq!(normalize_language("TS"), "typescript");
        assert_eq!(normalize_language(" py "), "python");
        assert_eq!(normalize_language("svelte"), "svelte");
    }

    #[test]
    fn test_split_plain_lines() {
        assert_eq!(split_balanced_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_balanced_lines(""), vec![""]);
    }

    #[test]
    fn test_split_reopens_spanning_elements() {
        let html = "<a-c>/* one\ntwo */</a-c>\n<a-k>fn</a-k> x";
        assert_eq!(
            split_balanced_lines(html),
            vec![
                "<a-c>/* one</a-c>",
                "<a-c>two */</a-c>",
                "<a-k>fn</a-k> x",
            ]
        );
    }

    #[test]
    fn test_split_nested_with_attributes() {
        let html = "<span class=\"s\"><a-s>\"a\nb\"</a-s></span>";
        assert_eq!(
            split_balanced_lines(html),
            vec![
                "<span class=\"s\"><a-s>\"a</a-s></span>",
                "<span class=\"s\"><a-s>b\"</a-s></span>",
            ]
        );
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("<a-k>"), "a-k");
        assert_eq!(tag_name("<span class=\"x\">"), "span");
    }

    #[tokio::test]
    async fn test_plain_text_needs_no_grammar() {
        let hl = ArboriumHighlighter::new();
        hl.load_language("text").await.unwrap();
        let html = hl.render("<b>\nx", "text", "css-variables").unwrap();
        assert!(html.contains("<span class=\"line\">&lt;b&gt;</span>\n<span class=\"line\">x</span>"));
    }

    #[tokio::test]
    async fn test_unknown_language_fails_to_load() {
        let hl = ArboriumHighlighter::new();
        let err = hl.load_language("no-such-language-xyz").await.unwrap_err();
        assert!(matches!(err, HighlightError::UnknownLanguage(_)));
    }
}
