//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Clean** - dev mode removes generated route directories
//! - **Collect** - sorted `*.md` files below `build.pages`
//! - **Lex** - read and tokenize every file in parallel
//! - **Compile** - token walk per document, strictly in order
//! - **Write** - one `+page.svelte` per published page, then the registry

use crate::{
    compiler::{Compiler, PageBuild, Token, lex},
    config::SiteConfig,
    debug,
    highlight::ArboriumHighlighter,
    log,
    logger::ProgressLine,
    page::{Assembly, Registry, artifact, assemble},
    utils::{
        fs::{clear_output_dirs, collect_markdown},
        plural_count,
        slug::document_slug,
    },
};
use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What a compilation pass produces besides the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Write `+page.svelte` files.
    Routes,
    /// Compile only.
    Nothing,
}

/// Outcome of compiling every document.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub registry: Registry,
    pub published: usize,
    pub skipped: usize,
    /// Documents that failed to read or compile, in source order.
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

/// A source file read and lexed ahead of compilation.
struct Source {
    path: PathBuf,
    slug: String,
    tokens: Vec<Token>,
}

// ============================================================================
// build command
// ============================================================================

/// Run the full build: routes, then the registry file.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    if config.build.dev {
        clean_output(config)?;
    }

    let report = compile_site(config, Emit::Routes, false)?;
    write_registry(&report.registry, &config.build.registry)?;

    log!(
        "build";
        "{} published, {} skipped",
        plural_count(report.published, "page"),
        report.skipped
    );
    debug!("build"; "registry written to {}", config.root_relative(&config.build.registry).display());

    fail_on_errors(&report)
}

/// Dev-mode cleanup of generated route directories.
fn clean_output(config: &SiteConfig) -> Result<()> {
    let dir = config.build.output_dir();
    let removed = clear_output_dirs(&dir)?;
    if removed > 0 {
        log!("clean"; "removed {} in {}", plural_count(removed, "folder"), config.root_relative(&dir).display());
    }
    Ok(())
}

/// Turn collected document failures into the command's error.
pub fn fail_on_errors(report: &BuildReport) -> Result<()> {
    match report.failed.len() {
        0 => Ok(()),
        n => bail!("{} failed", plural_count(n, "document")),
    }
}

// ============================================================================
// compilation
// ============================================================================

/// Compile every document below `build.pages`.
///
/// Failed documents are logged and collected in the report. Errors
/// writing an artifact abort the whole pass.
pub fn compile_site(config: &SiteConfig, emit: Emit, quiet: bool) -> Result<BuildReport> {
    let pages_dir = &config.build.pages;
    if !pages_dir.is_dir() {
        bail!("pages directory {} not found", pages_dir.display());
    }

    let files = collect_markdown(pages_dir);
    if files.is_empty() {
        log!("warning"; "no markdown files in {}", config.root_relative(pages_dir).display());
    }

    let sources: Vec<Result<Source, (PathBuf, anyhow::Error)>> = files
        .par_iter()
        .map(|path| read_source(path, pages_dir).map_err(|e| (path.clone(), e)))
        .collect();

    let progress = (!quiet && !files.is_empty()).then(|| ProgressLine::new(&[("markdown", files.len())]));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(compile_sources(sources, config, emit, quiet, progress.as_ref()))?;

    if let Some(p) = progress {
        p.finish();
    }
    Ok(report)
}

fn read_source(path: &Path, pages_dir: &Path) -> Result<Source> {
    let markdown =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let relative = path.strip_prefix(pages_dir).unwrap_or(path);

    Ok(Source {
        path: path.to_path_buf(),
        slug: document_slug(relative),
        tokens: lex(&markdown),
    })
}

async fn compile_sources(
    sources: Vec<Result<Source, (PathBuf, anyhow::Error)>>,
    config: &SiteConfig,
    emit: Emit,
    quiet: bool,
    progress: Option<&ProgressLine>,
) -> Result<BuildReport> {
    let highlighter = ArboriumHighlighter::new();
    let compiler = Compiler::new(&highlighter, &config.build.theme);
    let output_root = config.build.routes.to_string_lossy();
    let prefix = config.build.output_prefix();

    let mut report = BuildReport::default();

    for source in sources {
        if let Some(p) = progress {
            p.inc("markdown");
        }

        let source = match source {
            Ok(source) => source,
            Err((path, err)) => {
                report_failure(config, &path, &err, quiet);
                report.failed.push((path, err));
                continue;
            }
        };

        let mut page = PageBuild::new();
        if let Err(err) = compiler.compile(&source.tokens, &mut page).await {
            let err = anyhow!(err);
            report_failure(config, &source.path, &err, quiet);
            report.failed.push((source.path, err));
            continue;
        }

        let slug = join_slug(&prefix, &source.slug);
        match assemble(&slug, page, &output_root, &mut report.registry) {
            Assembly::Skipped { keys } => {
                debug!("skip"; "{} has {} metadata keys", config.root_relative(&source.path).display(), keys);
                report.skipped += 1;
            }
            Assembly::Page(page) => {
                if emit == Emit::Routes {
                    let path = artifact::artifact_path(&config.build.routes, &page.href);
                    write_file(&path, &artifact::render(&page, &config.site))?;
                    debug!("build"; "{} -> {}", page.href, config.root_relative(&path).display());
                }
                report.published += 1;
            }
        }
    }

    Ok(report)
}

fn report_failure(config: &SiteConfig, path: &Path, err: &anyhow::Error, quiet: bool) {
    let path = config.root_relative(path);
    if quiet {
        eprintln!("error: {}: {:#}", path.display(), err);
    } else {
        log!("error"; "{}: {:#}", path.display(), err);
    }
}

/// Slug of a document below the artifact directory.
fn join_slug(prefix: &str, slug: &str) -> String {
    if prefix.is_empty() {
        slug.to_string()
    } else {
        format!("{prefix}/{slug}")
    }
}

// ============================================================================
// output
// ============================================================================

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Write the registry as pretty JSON.
pub fn write_registry(registry: &Registry, path: &Path) -> Result<()> {
    let json = registry.to_json(true).context("failed to serialize registry")?;
    write_file(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = "---\ntitle: {title}\ndescription: About {title}\nlayout: guides\n---\n\n";

    fn page(title: &str, body: &str) -> String {
        format!("{}{body}", META.replace("{title}", title))
    }

    fn site(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = dir.to_path_buf();
        config.site.app_name = "Kit".into();
        config.site.domain_url = "https://kit.dev".into();
        config.build.pages = dir.join("pages");
        config.build.routes = dir.join("src/routes");
        config.build.registry = dir.join("src/lib/docs.json");
        config
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_join_slug() {
        assert_eq!(join_slug("docs", "guides/index"), "docs/guides/index");
        assert_eq!(join_slug("", "intro"), "intro");
    }

    #[test]
    fn test_build_writes_routes_and_registry() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "pages/[1]intro.md", &page("Intro", "## Setup\n\nHello.\n"));
        write(root, "pages/guides/index.md", &page("Guides", "All guides.\n"));
        write(root, "pages/draft.md", "---\ntitle: Draft\n---\n\nNot listed.\n");
        let config = site(root);

        build_site(&config).unwrap();

        let intro = fs::read_to_string(root.join("src/routes/docs/intro/+page.svelte")).unwrap();
        assert!(intro.contains("<title>Intro | Kit</title>"));
        assert!(intro.contains("content=\"https://kit.dev/docs/intro\""));
        assert!(intro.contains("<h2 id=\"setup\">Setup</h2>"));
        assert!(root.join("src/routes/docs/guides/+page.svelte").is_file());
        assert!(!root.join("src/routes/docs/draft").exists());

        let json = fs::read_to_string(root.join("src/lib/docs.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let guides = value["guides"].as_array().unwrap();
        let hrefs: Vec<&str> = guides.iter().map(|g| g["href"].as_str().unwrap()).collect();
        assert_eq!(hrefs, vec!["/docs/intro", "/docs/guides"]);
        assert_eq!(guides[0]["headers"][0]["id"], "setup");
        assert_eq!(guides[0]["new"], false);
    }

    #[test]
    fn test_query_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "pages/a.md", &page("A", "Text.\n"));
        let config = site(root);

        let report = compile_site(&config, Emit::Nothing, true).unwrap();

        assert_eq!(report.published, 1);
        assert_eq!(report.registry.len(), 1);
        assert!(!root.join("src/routes").exists());
    }

    #[test]
    fn test_missing_pages_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path());
        assert!(compile_site(&config, Emit::Nothing, true).is_err());
    }

    #[test]
    fn test_dev_mode_clears_generated_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "pages/a.md", &page("A", "Text.\n"));
        write(root, "src/routes/docs/stale/+page.svelte", "old");
        write(root, "src/routes/docs/+layout.svelte", "layout");
        let mut config = site(root);
        config.build.dev = true;

        build_site(&config).unwrap();

        assert!(!root.join("src/routes/docs/stale").exists());
        assert!(root.join("src/routes/docs/+layout.svelte").is_file());
        assert!(root.join("src/routes/docs/a/+page.svelte").is_file());
    }
}
