//! Code fence dispatch.
//!
//! A fence's info string doubles as a control channel. It is parsed once
//! into a [`Directive`], then the page record is updated accordingly:
//!
//! | info string (normalized)                 | effect                              |
//! |------------------------------------------|-------------------------------------|
//! | `[warning]`                              | warning block with the raw text     |
//! | `js/ts/javascript/typescript [code]`     | replace the script body             |
//! | `css [code]`                             | replace the style body              |
//! | `svelte [add]`                           | raw markup                          |
//! | `svelte [all]`                           | highlighted source, then raw markup |
//! | anything else                            | highlighted source                  |

use super::Compiler;
use super::record::PageBuild;
use super::token::CodeToken;
use crate::highlight::{HighlightError, Highlighter, highlight_code};

/// Language used to show the source of `svelte [all]` fences.
const SHOW_LANGUAGE: &str = "svelte";

/// What a code fence asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Warning,
    ScriptInject,
    StyleInject,
    MarkupInject,
    MarkupInjectAndShow,
    /// Highlight with the given language.
    Display(&'a str),
}

impl<'a> Directive<'a> {
    /// Parse a normalized (trimmed, lower-cased) info string.
    pub fn parse(lang: &'a str) -> Self {
        match lang {
            "[warning]" => Self::Warning,
            "js [code]" | "ts [code]" | "javascript [code]" | "typescript [code]" => {
                Self::ScriptInject
            }
            "css [code]" => Self::StyleInject,
            "svelte [add]" => Self::MarkupInject,
            "svelte [all]" => Self::MarkupInjectAndShow,
            other => Self::Display(other),
        }
    }
}

/// Trim and lower-case a fence info string.
pub fn normalize_lang(lang: &str) -> String {
    lang.trim().to_lowercase()
}

impl<H: Highlighter> Compiler<'_, H> {
    /// Apply one code fence to the page record.
    ///
    /// The clipboard helper is ensured before the directive is looked at,
    /// whatever the directive turns out to be.
    pub async fn dispatch(&self, token: &CodeToken, page: &mut PageBuild) -> Result<(), HighlightError> {
        let lang = normalize_lang(&token.lang);
        page.ensure_copy_helper();

        match Directive::parse(&lang) {
            Directive::Warning => {
                page.push_body(&format!("<div data-md=\"warning\">{}</div>\n", token.text));
            }
            Directive::ScriptInject => page.replace_script(&token.text),
            Directive::StyleInject => page.replace_style(&token.text),
            Directive::MarkupInject => {
                page.push_body(&format!("{}\n", token.text));
            }
            Directive::MarkupInjectAndShow => {
                let block = self.code_block(&token.text, SHOW_LANGUAGE).await?;
                page.push_body(&block);
                page.push_body(&format!("{}\n", token.text));
            }
            Directive::Display(language) => {
                let block = self.code_block(&token.text, language).await?;
                page.push_body(&block);
            }
        }

        Ok(())
    }

    /// Highlighted code with a copy button.
    async fn code_block(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
        let html = highlight_code(self.highlighter, code, lang, self.theme).await?;
        Ok(format!(
            "<div data-md=\"code\"><button on:click={{copyText}}>Copy</button>{html}</div>\n"
        ))
    }
}
