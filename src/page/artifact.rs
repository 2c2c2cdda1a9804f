//! Svelte page rendering.

use std::path::{Path, PathBuf};

use super::assemble::PageArtifact;
use crate::config::SiteSection;
use crate::embed::page::HeadVars;

/// File name of a route page.
pub const PAGE_FILE: &str = "+page.svelte";

/// Render the full `+page.svelte` source.
///
/// Layout: optional `<script>`, the `<svelte:head>` block, the body
/// markup, optional `<style>`.
pub fn render(artifact: &PageArtifact, site: &SiteSection) -> String {
    let page = &artifact.page;
    let mut out = String::new();

    if !page.script.is_empty() {
        out.push_str(&format!("<script lang=\"ts\">\n{}\n</script>\n", page.script));
    }

    out.push('\n');
    out.push_str(&head_vars(artifact, site).render());
    out.push_str(&page.body);

    if !page.style.is_empty() {
        out.push_str(&format!("<style>\n{}</style>", page.style));
    }

    out
}

fn head_vars(artifact: &PageArtifact, site: &SiteSection) -> HeadVars {
    let meta = |key: &str| artifact.page.meta(key).unwrap_or_default();

    let title = match (meta("title"), site.app_name.as_str()) {
        (title, "") => title.to_string(),
        (title, app) => format!("{title} | {app}"),
    };
    let image = match meta("image") {
        "" => site.default_image.clone(),
        image => image.to_string(),
    };

    HeadVars {
        title,
        description: meta("description").to_string(),
        url: format!("{}{}", site.domain_url, artifact.href),
        image,
    }
}

/// Where the page for `href` lives below the routes directory.
pub fn artifact_path(routes: &Path, href: &str) -> PathBuf {
    let relative = href.trim_matches('/');
    if relative.is_empty() {
        routes.join(PAGE_FILE)
    } else {
        routes.join(relative).join(PAGE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::PageBuild;

    fn site() -> SiteSection {
        SiteSection {
            app_name: "Kit".into(),
            domain_url: "https://kit.dev".into(),
            default_image: "https://kit.dev/og.png".into(),
        }
    }

    fn artifact(script: &str, style: &str) -> PageArtifact {
        let mut page = PageBuild::new();
        page.metadata.insert("title".into(), "Intro".into());
        page.metadata.insert("description".into(), "Start here".into());
        page.metadata.insert("layout".into(), "guides".into());
        page.body = "<p>Hello</p>\n".into();
        page.script = script.into();
        page.style = style.into();
        PageArtifact {
            href: "/docs/intro".into(),
            page,
        }
    }

    #[test]
    fn test_render_full_page() {
        let out = render(&artifact("let a = 1;", "p { color: red; }\n"), &site());

        assert!(out.starts_with("<script lang=\"ts\">\nlet a = 1;\n</script>\n\n<svelte:head>"));
        assert!(out.contains("<title>Intro | Kit</title>"));
        assert!(out.contains("content=\"https://kit.dev/docs/intro\""));
        assert!(out.contains("<meta property=\"og:image\" content=\"https://kit.dev/og.png\" />"));
        assert!(out.contains("</svelte:head>\n<p>Hello</p>\n<style>"));
        assert!(out.ends_with("<style>\np { color: red; }\n</style>"));
    }

    #[test]
    fn test_render_without_script_or_style() {
        let out = render(&artifact("", ""), &site());
        assert!(out.starts_with("\n<svelte:head>"));
        assert!(!out.contains("<script"));
        assert!(!out.contains("<style>"));
        assert!(out.ends_with("<p>Hello</p>\n"));
    }

    #[test]
    fn test_metadata_image_wins() {
        let mut a = artifact("", "");
        a.page.metadata.insert("image".into(), "/cover.png".into());
        let out = render(&a, &site());
        assert!(out.contains("<meta property=\"twitter:image\" content=\"/cover.png\" />"));
    }

    #[test]
    fn test_artifact_path() {
        let routes = Path::new("src/routes");
        assert_eq!(
            artifact_path(routes, "/docs/guides"),
            PathBuf::from("src/routes/docs/guides/+page.svelte")
        );
        assert_eq!(artifact_path(routes, "/"), PathBuf::from("src/routes/+page.svelte"));
    }
}
