//! Embedded static resources.
//!
//! - `page` - Svelte page fragments (head block, clipboard helper)
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::HeadVars;
//!
//! let head = HeadVars { title: "Intro | Docs".into(), .. }.render();
//! ```

pub mod page {
    use crate::utils::html::escape_attr;

    /// Marker used to detect whether the clipboard helper is present.
    pub const COPY_TEXT_SIGNATURE: &str = "copyText(e:MouseEvent)";

    /// Clipboard helper called by the copy button of every code block.
    pub const COPY_TEXT_TS: &str = include_str!("copy_text.ts");

    /// Variables for head.svelte. Values are escaped on injection.
    pub struct HeadVars {
        pub title: String,
        pub description: String,
        pub url: String,
        pub image: String,
    }

    impl HeadVars {
        /// Fill [`HEAD_SVELTE`] with these values.
        pub fn render(&self) -> String {
            HEAD_SVELTE
                .replace("__MDROUTE_TITLE__", &escape_attr(&self.title))
                .replace("__MDROUTE_DESCRIPTION__", &escape_attr(&self.description))
                .replace("__MDROUTE_URL__", &escape_attr(&self.url))
                .replace("__MDROUTE_IMAGE__", &escape_attr(&self.image))
        }
    }

    /// `<svelte:head>` block with primary, Open Graph and Twitter tags.
    pub const HEAD_SVELTE: &str = include_str!("head.svelte");

}
