//! Query command implementation.
//!
//! Compiles every document without writing routes and prints the
//! navigation registry as JSON.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use super::build::{Emit, compile_site, fail_on_errors};
use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    // stdout carries the JSON, so progress output stays off
    let quiet = args.output.is_none();
    let report = compile_site(config, Emit::Nothing, quiet)?;
    if report.registry.is_empty() && !quiet {
        log!("warning"; "no page has enough metadata to be listed");
    }

    let json = report
        .registry
        .to_json(args.pretty)
        .context("failed to serialize registry")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("query"; "{} written to {}", plural_count(report.registry.len(), "page"), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    fail_on_errors(&report)
}
