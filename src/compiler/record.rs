//! Per-document build record.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::embed::page::{COPY_TEXT_SIGNATURE, COPY_TEXT_TS};

/// Minimum number of metadata keys for a document to be published.
pub const MIN_METADATA_KEYS: usize = 3;

/// Document metadata, `key -> value`.
pub type Metadata = BTreeMap<String, String>;

/// A section heading collected for in-page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub id: String,
    pub text: String,
}

/// Everything compiled for one document so far.
///
/// Owned by a single token walk. Accumulators only grow, except that
/// script and style injection replace their whole body.
#[derive(Debug, Default, Clone)]
pub struct PageBuild {
    /// Script body of the page.
    pub script: String,
    /// Rendered markup, append-only.
    pub body: String,
    /// Injected style text.
    pub style: String,
    pub metadata: Metadata,
    /// Collected section headings, append-only.
    pub headers: Vec<Header>,
}

impl PageBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_body(&mut self, markup: &str) {
        self.body.push_str(markup);
    }

    /// Append the clipboard helper unless the script already defines it.
    ///
    /// Checked on every code fence: a script fence may have replaced the
    /// body since the last one.
    pub fn ensure_copy_helper(&mut self) {
        if !self.script.contains(COPY_TEXT_SIGNATURE) {
            self.script.push_str(COPY_TEXT_TS);
        }
    }

    pub fn replace_script(&mut self, text: &str) {
        self.script = text.to_string();
    }

    pub fn replace_style(&mut self, text: &str) {
        self.style = format!("{text}\n");
    }

    /// Whether enough metadata was found to list the document.
    pub fn is_publishable(&self) -> bool {
        self.metadata.len() >= MIN_METADATA_KEYS
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
