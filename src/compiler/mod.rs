//! Markdown to page compilation.
//!
//! ```text
//! markdown ──lex──► [Token] ──Compiler::compile──► PageBuild
//!                               │
//!                               ├─ heading / paragraph / list / space / raw
//!                               └─ code ──► fence::dispatch ──► highlighter
//! ```
//!
//! One [`PageBuild`] is owned by one walk. Code tokens are awaited in
//! place so every accumulator follows document order.

pub mod fence;
pub mod handlers;
pub mod lexer;
pub mod record;
pub mod token;


use crate::{
    debug,
    highlight::{HighlightError, Highlighter},
};

pub use lexer::lex;
pub use record::{Header, Metadata, PageBuild};
pub use token::Token;

/// Walks the token stream of one document at a time.
pub struct Compiler<'a, H> {
    highlighter: &'a H,
    theme: &'a str,
}

impl<'a, H: Highlighter> Compiler<'a, H> {
    pub fn new(highlighter: &'a H, theme: &'a str) -> Self {
        Self { highlighter, theme }
    }

    /// Run every token through its handler, in order.
    ///
    /// Stops at the first highlighter failure; `page` keeps whatever was
    /// accumulated before it and must be discarded by the caller.
    pub async fn compile(&self, tokens: &[Token], page: &mut PageBuild) -> Result<(), HighlightError> {
        for token in tokens {
            match token {
                Token::Heading(heading) => handlers::heading(heading, page),
                Token::Paragraph(block) => handlers::paragraph(block, page),
                Token::Space => handlers::space(page),
                Token::Code(code) => {
                    if let Err(err) = self.dispatch(code, page).await {
                        debug!("compile"; "{} block failed", token.kind_name());
                        return Err(err);
                    }
                }
                Token::List(block) => handlers::list(block, page),
                Token::Raw(raw) => handlers::raw(raw, page),
            }
        }
        Ok(())
    }

    /// Lex and compile a whole document into a fresh record.
    pub async fn compile_markdown(&self, markdown: &str) -> Result<PageBuild, HighlightError> {
        let tokens = lex(markdown);
        let mut page = PageBuild::new();
        self.compile(&tokens, &mut page).await?;
        Ok(page)
    }
}
