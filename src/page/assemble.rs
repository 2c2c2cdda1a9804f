//! Turn a compiled record into a published page.

use super::registry::{LayoutKey, PageSummary, Registry};
use crate::compiler::PageBuild;

/// Result of assembling one document.
#[derive(Debug)]
pub enum Assembly {
    /// Not enough metadata; nothing is written or listed.
    Skipped { keys: usize },
    Page(PageArtifact),
}

/// A page ready to be rendered and written.
#[derive(Debug)]
pub struct PageArtifact {
    /// Public path, always starting with `/`.
    pub href: String,
    pub page: PageBuild,
}

/// Validate the record, list it in the registry and hand it back for
/// rendering.
pub fn assemble(slug: &str, page: PageBuild, output_root: &str, registry: &mut Registry) -> Assembly {
    if !page.is_publishable() {
        return Assembly::Skipped {
            keys: page.metadata.len(),
        };
    }

    let href = derive_href(slug, output_root);
    registry.insert(
        LayoutKey::from_metadata(&page.metadata),
        PageSummary::new(page.metadata.clone(), href.clone(), page.headers.clone()),
    );

    Assembly::Page(PageArtifact { href, page })
}

/// Public path of a document.
///
/// `output_root` and `slug` are joined, repeated separators collapse, the
/// root prefix is removed and a trailing `index` segment resolves to its
/// directory. The result has a leading `/` and no trailing one.
///
/// # Examples
/// ```ignore
/// assert_eq!(derive_href("guides/index", "site/docs"), "/guides");
/// assert_eq!(derive_href("docs/intro", "src/routes"), "/docs/intro");
/// assert_eq!(derive_href("index", "src/routes"), "/");
/// ```
pub fn derive_href(slug: &str, output_root: &str) -> String {
    let root = collapse_separators(output_root.trim_end_matches('/'));
    let joined = collapse_separators(&format!("{root}/{slug}"));

    let path = joined.strip_prefix(root.as_str()).unwrap_or(&joined);
    let path = path.trim_matches('/');
    let path = match path.strip_suffix("index") {
        Some(parent) if parent.is_empty() || parent.ends_with('/') => parent,
        _ => path,
    };

    format!("/{}", path.trim_matches('/'))
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}
