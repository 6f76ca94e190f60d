//! Loading site content: articles, authors and games.

mod article;
mod authors;
mod games;

use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::markdown::MarkdownError;
use crate::engine::Value;

pub use article::{Article, ArticleMetadata, load_articles};
pub use authors::{Authors, fallback_author, load_authors};
pub use games::{GameMetadata, load_games};

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {}: {source}", .path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },
}

/// Files in `dir` whose extension matches `extension` case-insensitively,
/// sorted by file name.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ContentError> {
    let io_err = |source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name without its extension, as a string.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The string form of a truthy value, `None` when missing or falsy.
fn truthy_text(value: Option<&JsonValue>) -> Option<String> {
    let value = Value::from(value?.clone());
    value.is_truthy().then(|| value.to_string())
}
