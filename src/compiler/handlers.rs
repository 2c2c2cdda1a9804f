//! Block handlers for every token kind except code fences.

use std::sync::LazyLock;

use regex::Regex;

use super::record::{Header, PageBuild};
use super::token::{BlockToken, HeadingToken, RawKind, RawToken};
use crate::utils::slug::anchor;

/// `key: value` line of a metadata block.
static META_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][\w-]*)\s*:(.*)$").expect("valid regex")
});

/// Depth of the headings listed in page navigation.
const NAV_DEPTH: u8 = 2;

// ============================================================================
// Headings
// ============================================================================

/// Merge a metadata block or render a heading.
pub fn heading(token: &HeadingToken, page: &mut PageBuild) {
    if let Some(pairs) = metadata_pairs(token) {
        page.metadata.extend(pairs);
        return;
    }

    let id = token.id.clone().unwrap_or_else(|| anchor(&token.text));
    page.push_body(&format!(
        "<h{depth} id=\"{id}\">{html}</h{depth}>\n",
        depth = token.depth,
        html = token.html,
    ));

    if token.depth == NAV_DEPTH {
        page.headers.push(Header {
            id,
            text: token.text.clone(),
        });
    }
}

/// Parse a setext heading made only of `key: value` lines.
fn metadata_pairs(token: &HeadingToken) -> Option<Vec<(String, String)>> {
    if !token.is_setext() {
        return None;
    }

    let pairs = token
        .setext_lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let caps = META_LINE.captures(line)?;
            Some((caps[1].to_lowercase(), caps[2].trim().to_string()))
        })
        .collect::<Option<Vec<_>>>()?;

    (!pairs.is_empty()).then_some(pairs)
}

// ============================================================================
// Other blocks
// ============================================================================

pub fn paragraph(token: &BlockToken, page: &mut PageBuild) {
    page.push_body(&token.html);
}

pub fn list(token: &BlockToken, page: &mut PageBuild) {
    page.push_body(&token.html);
}

pub fn space(page: &mut PageBuild) {
    page.push_body("\n");
}

/// Fallback for every other block. Rules are dropped.
pub fn raw(token: &RawToken, page: &mut PageBuild) {
    if token.kind == RawKind::Rule {
        return;
    }
    page.push_body(&token.html);
}
