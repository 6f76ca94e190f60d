use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Value as JsonValue, json};

use super::{ContentError, file_stem, files_with_extension};

/// Author records by id (the file stem of `<id>.json`).
pub type Authors = BTreeMap<String, JsonValue>;

/// Stand-in record for an author without a readable file.
pub fn fallback_author(name: &str) -> JsonValue {
    json!({
        "name": name,
        "bio": "",
        "links": {},
    })
}

/// Read every `*.json` file of `dir` as an author record.
///
/// A file that cannot be read or parsed still produces an author, using
/// [`fallback_author`].
pub fn load_authors(dir: &Path) -> Result<Authors, ContentError> {
    let mut authors = Authors::new();
    for path in files_with_extension(dir, "json")? {
        let id = file_stem(&path);
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<JsonValue>(&text).map_err(|e| e.to_string()));

        let author = match parsed {
            Ok(author) => author,
            Err(e) => {
                tracing::warn!("author metadata for '{id}' unreadable, using default: {e}");
                fallback_author(&id)
            }
        };
        authors.insert(id, author);
    }
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_authors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tofu.json"),
            r#"{"name": "Tofu", "bio": "Writes things", "links": {"github": "tofu"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.JSON"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.md"), "# not an author").unwrap();

        let authors = load_authors(dir.path()).unwrap();

        assert_eq!(authors.len(), 2);
        assert_eq!(authors["tofu"]["name"], "Tofu");
        assert_eq!(authors["tofu"]["links"]["github"], "tofu");
        assert_eq!(authors["broken"], fallback_author("broken"));
    }

    #[test]
    fn test_fallback_author_shape() {
        let author = fallback_author("ghost");
        assert_eq!(author["name"], "ghost");
        assert_eq!(author["bio"], "");
        assert!(author["links"].as_object().unwrap().is_empty());
    }
}
