//! Syntax highlighting for code fences.
//!
//! - [`Highlighter`] - grammar loading + rendering seam
//! - [`ArboriumHighlighter`] - tree-sitter backed implementation
//! - [`lines`] - `//[H]` / `//[R]` line tagging on rendered output
//!
//! Every highlighter renders shiki-shaped markup: one
//! `<span class="line">` wrapper per source line inside
//! `<pre ... tabindex="0"><code>`. The line tagger relies on that shape.

mod treesitter;
pub mod lines;
#[cfg(test)]
pub mod testing;

use thiserror::Error;

pub use treesitter::ArboriumHighlighter;
pub use lines::{Sentinel, mark_lines};

/// Highlighting errors. Both abort the document being compiled.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("failed to highlight `{lang}`: {message}")]
    Render { lang: String, message: String },
}

/// A syntax highlighter that loads grammars on demand.
#[allow(async_fn_in_trait)]
pub trait Highlighter {
    /// Make the grammar for `lang` available.
    ///
    /// Idempotent. Fails with [`HighlightError::UnknownLanguage`] when no
    /// grammar exists for `lang`.
    async fn load_language(&self, lang: &str) -> Result<(), HighlightError>;

    /// Render `code` as line-wrapped HTML. `lang` must have been loaded.
    fn render(&self, code: &str, lang: &str, theme: &str) -> Result<String, HighlightError>;
}

/// Load the grammar, render, then tag `//[H]` and `//[R]` lines.
pub async fn highlight_code<H: Highlighter>(
    highlighter: &H,
    code: &str,
    lang: &str,
    theme: &str,
) -> Result<String, HighlightError> {
    highlighter.load_language(lang).await?;
    let html = highlighter.render(code, lang, theme)?;
    let html = mark_lines(&html, Sentinel::Added);
    Ok(mark_lines(&html, Sentinel::Removed))
}

/// Wrap already-highlighted lines in the shared `<pre><code>` frame.
pub(crate) fn frame_lines<I, S>(lines: I, theme: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let body = lines
        .into_iter()
        .map(|line| format!("<span class=\"line\">{}</span>", line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<pre class=\"shiki {}\" tabindex=\"0\"><code>{body}</code></pre>",
        crate::utils::html::escape_attr(theme)
    )
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHighlighter;
    use super::*;

    #[test]
    fn test_frame_lines() {
        let html = frame_lines(["a", "b"], "css-variables");
        assert_eq!(
            html,
            "<pre class=\"shiki css-variables\" tabindex=\"0\"><code>\
             <span class=\"line\">a</span>\n<span class=\"line\">b</span></code></pre>"
        );
    }

    #[tokio::test]
    async fn test_highlight_code_tags_lines_and_applies_rewrites() {
        let hl = RecordingHighlighter::new();
        let code = "let a = 1;\nlet b = 2; //[H]\nlet c = 3; //[R]";

        let html = highlight_code(&hl, code, "js", "css-variables")
            .await
            .unwrap();

        assert_eq!(hl.loads(), vec!["js".to_string()]);
        assert!(html.contains("<span class=\"line added\">let b = 2; </span>"));
        assert!(html.contains("<span class=\"line removed\">let c = 3; </span>"));
        assert!(html.contains("tabindex=\"-1\""));
        assert!(!html.contains("//[H]"));
        assert!(!html.contains("//[R]"));
    }

    #[tokio::test]
    async fn test_highlight_code_unknown_language_fails() {
        let hl = RecordingHighlighter::new();
        let err = highlight_code(&hl, "x", "nope", "css-variables")
            .await
            .unwrap_err();
        assert!(matches!(err, HighlightError::UnknownLanguage(lang) if lang == "nope"));
    }
}
