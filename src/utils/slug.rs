//! Slug generation for heading anchors and document paths.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

/// `[N]` ordering markers in source file names, e.g. `[2]install.md`.
static ORDER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("valid regex"));

/// Convert heading text to an anchor id.
///
/// Whitespace runs collapse to one space, everything except ASCII word
/// characters and whitespace is dropped, then the result is lower-cased,
/// trimmed and spaces become `-`.
///
/// # Examples
/// ```ignore
/// assert_eq!(anchor("Hello,  World!"), "hello-world");
/// assert_eq!(anchor("  Step 2: run_it "), "step-2-run_it");
/// ```
pub fn anchor(text: &str) -> String {
    let kept: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .collect();

    kept.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug of a markdown document relative to the pages directory.
///
/// Ordering markers are removed, the `.md` extension is dropped and
/// separators are normalized to `/`. `index` is kept; collapsing it is the
/// job of href derivation.
///
/// # Examples
/// ```ignore
/// assert_eq!(document_slug(Path::new("guides/[1]install.md")), "guides/install");
/// assert_eq!(document_slug(Path::new("index.md")), "index");
/// ```
pub fn document_slug(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .map(|part| ORDER_MARKER.replace_all(&part, "").into_owned())
        .collect();

    let joined = parts.join("/");
    match joined.strip_suffix(".md") {
        Some(stem) => stem.to_string(),
        None => joined,
    }
}
