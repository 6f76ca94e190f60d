//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Config paths (relative to the config file's directory)
//! - URL paths (the URL at which a page will be served)
//! - Output file paths (where files are written in the output directory)

use std::path::{Component, Path, PathBuf};

/// Convert a URL path to an output file path.
///
/// Pages (no extension) become `path/index.html`.
/// Files with an extension keep their path.
///
/// # Examples
/// ```ignore
/// url_to_output_path("/articles/hello", output_dir) => output_dir/articles/hello/index.html
/// url_to_output_path("/", output_dir) => output_dir/index.html
/// url_to_output_path("/data.json", output_dir) => output_dir/data.json
/// ```
pub fn url_to_output_path(url_path: &str, output_dir: &Path) -> PathBuf {
    let url_path = url_path.trim_start_matches('/');

    if url_path.is_empty() {
        // Root path
        output_dir.join("index.html")
    } else if Path::new(url_path).extension().is_some() {
        output_dir.join(url_path)
    } else {
        output_dir.join(url_path).join("index.html")
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a configured path against the base path, unless it is absolute.
pub fn resolve_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Remove `.` components and fold `..` into the preceding component,
/// without touching the filesystem.
///
/// Leading `..` components of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}
