//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Validate a site URL and drop one trailing `/`.
///
/// Only `http` and `https` URLs with a host are accepted.
///
/// # Examples
/// ```ignore
/// normalize_domain_url("https://kit.dev/")      -> Ok("https://kit.dev")
/// normalize_domain_url("https://kit.dev/docs")  -> Ok("https://kit.dev/docs")
/// normalize_domain_url("kit.dev")               -> Err(..)
/// ```
pub fn normalize_domain_url(url_str: &str) -> Result<String, String> {
    let parsed = url::Url::parse(url_str).map_err(|e| format!("invalid URL `{url_str}`: {e}"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("URL `{url_str}` must use http or https"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("URL `{url_str}` has no host"));
    }

    let trimmed = url_str.strip_suffix('/').unwrap_or(url_str);
    Ok(trimmed.to_string())
}

/// Expand `~` and resolve a configured path against the project root.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
    if expanded.is_relative() {
        root.join(expanded)
    } else {
        expanded
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/pages/guides/  ← cwd
/// /home/user/site/mdroute.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// tests
// ============================================================================
