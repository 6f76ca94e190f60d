use std::path::Path;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{file_stem, files_with_extension, truthy_text};

/// A game entry from `<content>/games/*.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_site: Option<JsonValue>,
}

impl GameMetadata {
    /// Build an entry from parsed JSON, using `stem` for a missing title or slug.
    pub fn from_json(data: &JsonValue, stem: &str) -> Self {
        Self {
            title: truthy_text(data.get("title")).unwrap_or_else(|| stem.to_string()),
            slug: truthy_text(data.get("slug")).unwrap_or_else(|| stem.to_string()),
            description: truthy_text(data.get("description")).unwrap_or_default(),
            image: data.get("image").cloned(),
            release: data.get("release").cloned(),
            official_site: data.get("officialSite").cloned(),
        }
    }

    /// The image as text, when it is a non-empty string.
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Read the games directory. A missing or unreadable directory has no
/// games; files that fail to parse are skipped.
pub fn load_games(dir: &Path) -> Vec<GameMetadata> {
    if !dir.exists() {
        return Vec::new();
    }
    let files = match files_with_extension(dir, "json") {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("{e}");
            return Vec::new();
        }
    };

    let mut games = Vec::with_capacity(files.len());
    for path in files {
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<JsonValue>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(data) => {
                let game = GameMetadata::from_json(&data, &file_stem(&path));
                tracing::debug!(slug = %game.slug, "loaded game");
                games.push(game);
            }
            Err(e) => tracing::warn!("failed to parse game file {}: {e}", path.display()),
        }
    }
    games
}
