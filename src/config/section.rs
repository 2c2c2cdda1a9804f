//! Configuration sections of `mdroute.toml`.
//!
//! ```toml
//! [site]
//! app_name = "Kit"                      # Appended to every page title
//! domain_url = "https://kit.dev"        # Prefix of canonical and social URLs
//! default_image = "/og.png"             # Social preview fallback
//!
//! [build]
//! pages = "pages"                       # Markdown sources
//! routes = "src/routes"                 # Directory served at `/`
//! output = "docs"                       # Artifact directory, relative to `routes`
//! registry = "src/lib/docs.json"        # Navigation registry output
//! dev = false                           # Clear generated route dirs first
//! theme = "css-variables"               # Highlighter theme class
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ConfigDiagnostics, util::normalize_domain_url};

// ============================================================================
// [site]
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Suffix of every page title.
    pub app_name: String,

    /// Prefix for canonical and social URLs, without a trailing `/`.
    pub domain_url: String,

    /// Social preview image used when a page sets none.
    pub default_image: String,
}

impl SiteSection {
    pub fn validate(&mut self, diag: &mut ConfigDiagnostics) {
        if self.domain_url.is_empty() {
            diag.warn("site.domain_url", "empty, page URLs will be relative");
            return;
        }
        match normalize_domain_url(&self.domain_url) {
            Ok(url) => self.domain_url = url,
            Err(message) => diag.error("site.domain_url", message),
        }
    }
}

// ============================================================================
// [build]
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Markdown source directory.
    pub pages: PathBuf,

    /// Route directory whose contents map to URL `/`.
    pub routes: PathBuf,

    /// Artifact directory, relative to `routes`.
    pub output: PathBuf,

    /// Registry JSON file.
    pub registry: PathBuf,

    /// Remove generated route directories before building.
    pub dev: bool,

    /// Theme class on every code block.
    pub theme: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            pages: "pages".into(),
            routes: "src/routes".into(),
            output: "docs".into(),
            registry: "src/lib/docs.json".into(),
            dev: false,
            theme: "css-variables".into(),
        }
    }
}

impl BuildSection {
    /// Artifact directory on disk.
    pub fn output_dir(&self) -> PathBuf {
        self.routes.join(&self.output)
    }

    /// `output` as a `/`-joined slug prefix.
    pub fn output_prefix(&self) -> String {
        self.output
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.is_absolute() {
            diag.error("build.output", "must be relative to build.routes");
        }
        if self
            .output
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            diag.error("build.output", "must stay inside build.routes");
        }
        if self.theme.trim().is_empty() {
            diag.error("build.theme", "must not be empty");
        }
    }
}
