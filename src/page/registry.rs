//! Navigation registry: published pages grouped by layout.

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::compiler::{Header, Metadata};

/// Metadata key that selects the navigation group.
pub const LAYOUT_KEY: &str = "layout";

/// Group a page is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayoutKey {
    Named(String),
    /// No `layout` in the metadata, or an empty one.
    Uncategorized,
}

impl LayoutKey {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        match metadata.get(LAYOUT_KEY).map(|s| s.trim()) {
            Some(name) if !name.is_empty() => Self::Named(name.to_string()),
            _ => Self::Uncategorized,
        }
    }

    /// Key used in the serialized registry.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Uncategorized => "",
        }
    }
}

/// One navigation entry.
///
/// Serializes every metadata pair first, then the fixed fields. Fixed
/// fields are removed from `extra` so no key is written twice.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PageSummary {
    #[serde(flatten)]
    pub extra: Metadata,
    pub title: String,
    pub href: String,
    pub description: String,
    pub new: bool,
    pub headers: Vec<Header>,
}

impl PageSummary {
    /// Keys with a dedicated field.
    pub const FIXED: [&'static str; 5] = ["title", "href", "description", "new", "headers"];

    pub fn new(mut metadata: Metadata, href: String, headers: Vec<Header>) -> Self {
        let title = metadata.remove("title").unwrap_or_default();
        let description = metadata.remove("description").unwrap_or_default();
        let new = metadata.remove("new").is_some_and(|v| is_truthy(&v));
        metadata.retain(|key, _| !Self::FIXED.contains(&key.as_str()));

        Self {
            extra: metadata,
            title,
            href,
            description,
            new,
            headers,
        }
    }
}

/// Coerce a metadata string to a flag.
///
/// Empty, `false`, `0` and `no` (any case) are false; anything else is true.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value.eq_ignore_ascii_case("false")
        || value == "0"
        || value.eq_ignore_ascii_case("no"))
}

/// Published pages grouped by layout, in first-seen order.
///
/// Lives for one build. Insertion is single-writer: documents are
/// assembled one after another.
#[derive(Debug, Default)]
pub struct Registry {
    groups: Vec<(LayoutKey, Vec<PageSummary>)>,
    index: FxHashMap<LayoutKey, usize>,
}

impl Registry {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a summary, creating its group on first use.
    pub fn insert(&mut self, layout: LayoutKey, summary: PageSummary) {
        let slot = match self.index.get(&layout) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(layout.clone(), slot);
                self.groups.push((layout, Vec::new()));
                slot
            }
        };
        self.groups[slot].1.push(summary);
    }

    #[cfg(test)]
    pub fn get(&self, layout: &LayoutKey) -> Option<&[PageSummary]> {
        self.index
            .get(layout)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    #[cfg(test)]
    pub fn groups(&self) -> impl Iterator<Item = (&LayoutKey, &[PageSummary])> {
        self.groups
            .iter()
            .map(|(key, pages)| (key, pages.as_slice()))
    }

    /// Number of listed pages.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, pages)| pages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, pages) in &self.groups {
            map.serialize_entry(key.as_str(), pages)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn summary(title: &str) -> PageSummary {
        PageSummary::new(meta(&[("title", title)]), format!("/{title}"), Vec::new())
    }

    #[test]
    fn test_layout_key() {
        assert_eq!(
            LayoutKey::from_metadata(&meta(&[("layout", "guides")])),
            LayoutKey::Named("guides".into())
        );
        assert_eq!(LayoutKey::from_metadata(&meta(&[])), LayoutKey::Uncategorized);
        assert_eq!(
            LayoutKey::from_metadata(&meta(&[("layout", "  ")])),
            LayoutKey::Uncategorized
        );
    }

    #[test]
    fn test_is_truthy() {
        for yes in ["true", "yes", "1", "TRUE", "soon"] {
            assert!(is_truthy(yes), "{yes}");
        }
        for no in ["", " ", "false", "False", "0", "no", "NO"] {
            assert!(!is_truthy(no), "{no}");
        }
    }

    #[test]
    fn test_summary_fields() {
        let s = PageSummary::new(
            meta(&[
                ("title", "Intro"),
                ("description", "Start here"),
                ("layout", "guides"),
                ("new", "true"),
                ("href", "/ignored"),
            ]),
            "/docs/intro".into(),
            vec![Header {
                id: "setup".into(),
                text: "Setup".into(),
            }],
        );
        assert_eq!(s.title, "Intro");
        assert_eq!(s.description, "Start here");
        assert_eq!(s.href, "/docs/intro");
        assert!(s.new);
        assert_eq!(s.extra, meta(&[("layout", "guides")]));
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut registry = Registry::new();
        registry.insert(LayoutKey::Named("zeta".into()), summary("a"));
        registry.insert(LayoutKey::Named("alpha".into()), summary("b"));
        registry.insert(LayoutKey::Named("zeta".into()), summary("c"));

        let keys: Vec<&str> = registry.groups().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(registry.len(), 3);

        let zeta = registry.get(&LayoutKey::Named("zeta".into())).unwrap();
        let titles: Vec<&str> = zeta.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_json_shape() {
        let mut registry = Registry::new();
        registry.insert(
            LayoutKey::Named("guides".into()),
            PageSummary::new(
                meta(&[
                    ("title", "Intro"),
                    ("description", "D"),
                    ("layout", "guides"),
                    ("author", "sam"),
                ]),
                "/docs/intro".into(),
                vec![Header {
                    id: "a".into(),
                    text: "A".into(),
                }],
            ),
        );
        registry.insert(LayoutKey::Uncategorized, summary("loose"));

        let json = registry.to_json(false).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"guides":[{"author":"sam","layout":"guides","title":"Intro","href":"/docs/intro","#,
                r#""description":"D","new":false,"headers":[{"id":"a","text":"A"}]}],"#,
                r#""":[{"title":"loose","href":"/loose","description":"","new":false,"headers":[]}]}"#
            )
        );
    }
}
