//! Markdown articles and their metadata.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{ContentError, file_stem, files_with_extension, truthy_text};
use crate::build::document::{FrontMatter, parse_front_matter};
use crate::build::markdown::render_markdown;
use crate::config::MarkdownConfig;
use crate::engine::Value;
use crate::util::slugify;

/// Length of a generated excerpt, in characters.
const EXCERPT_LENGTH: usize = 150;

/// A rendered article.
#[derive(Debug, Clone)]
pub struct Article {
    pub metadata: ArticleMetadata,
    /// Article body as HTML
    pub content: String,
}

/// Everything templates know about an article.
///
/// Front matter keys are kept as they are, except for the fields below,
/// which always have a value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    #[serde(flatten)]
    pub extra: FrontMatter,
    pub title: String,
    pub description: String,
    pub date: String,
    pub author: String,
    pub categories: Vec<String>,
    pub categories_data: Vec<CategoryRef>,
    pub tag: String,
    pub tag_link: String,
    pub excerpt: String,
    pub slug: String,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

impl ArticleMetadata {
    /// Build metadata from front matter, the markdown body and the file stem.
    pub fn new(mut front_matter: FrontMatter, body: &str, slug: String) -> Self {
        let excerpt = truthy_text(front_matter.get("excerpt")).unwrap_or_else(|| excerpt(body));
        let categories = categories(front_matter.get("categories"));
        let categories_data = categories
            .iter()
            .map(|name| CategoryRef {
                name: name.clone(),
                slug: slugify(name),
            })
            .collect();
        let tag = tag(&front_matter);
        let tag_link = tag_link(&tag);

        let metadata = Self {
            title: truthy_text(front_matter.get("title")).unwrap_or_else(|| "Untitled".to_string()),
            description: truthy_text(front_matter.get("description"))
                .unwrap_or_else(|| excerpt.clone()),
            date: truthy_text(front_matter.get("date"))
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            author: truthy_text(front_matter.get("author"))
                .unwrap_or_else(|| "Anonymous".to_string()),
            featured: front_matter
                .get("featured")
                .is_some_and(|v| Value::from(v.clone()).is_truthy()),
            categories,
            categories_data,
            tag,
            tag_link,
            excerpt,
            slug,
            extra: FrontMatter::new(),
        };

        for key in OWN_KEYS {
            front_matter.remove(key);
        }
        Self {
            extra: front_matter,
            ..metadata
        }
    }

    /// Tag compared case-insensitively against `name`.
    pub fn is_tagged(&self, name: &str) -> bool {
        self.tag.eq_ignore_ascii_case(name)
    }

    /// Publication time, if the date can be read.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }
}

/// Serialized keys set by [`ArticleMetadata::new`] itself.
const OWN_KEYS: [&str; 11] = [
    "title",
    "description",
    "date",
    "author",
    "categories",
    "categoriesData",
    "tag",
    "tagLink",
    "excerpt",
    "slug",
    "featured",
];

/// First paragraph of the body, heading hashes stripped, cut to
/// [`EXCERPT_LENGTH`] characters and followed by `...`.
fn excerpt(body: &str) -> String {
    let first = body.split("\n\n").next().unwrap_or_default();
    let first = match first.strip_prefix('#') {
        Some(rest) => rest.trim_start_matches('#').trim_start(),
        None => first,
    };
    let mut excerpt: String = first.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

/// Category names in first-seen order. Anything but a list yields none.
fn categories(value: Option<&JsonValue>) -> Vec<String> {
    let Some(JsonValue::Array(items)) = value else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| Value::from(item.clone()).to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// The article's single tag: `tags` (string or first list element), else
/// `tag`, defaulting to `News`.
fn tag(front_matter: &FrontMatter) -> String {
    let tag = match (front_matter.get("tags"), front_matter.get("tag")) {
        (Some(JsonValue::String(tags)), _) => tags.trim().to_string(),
        (Some(JsonValue::Array(tags)), _) if !tags.is_empty() => {
            Value::from(tags[0].clone()).to_string().trim().to_string()
        }
        (_, Some(JsonValue::String(tag))) => tag.trim().to_string(),
        _ => String::new(),
    };
    if tag.is_empty() {
        "News".to_string()
    } else {
        tag
    }
}

fn tag_link(tag: &str) -> String {
    match tag.to_lowercase().as_str() {
        "news" => "/news".to_string(),
        "guide" | "guides" => "/guides".to_string(),
        _ => format!("/tags/{}", slugify(tag)),
    }
}

/// Read an article date: RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`,
/// the latter two taken as UTC.
fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Read one article file.
pub fn load_article(path: &Path, markdown: &MarkdownConfig) -> Result<Article, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_front_matter(&raw);

    let content =
        render_markdown(&parsed.content, markdown).map_err(|source| ContentError::Markdown {
            path: path.to_path_buf(),
            source,
        })?;
    let metadata = ArticleMetadata::new(parsed.front_matter, &parsed.content, file_stem(path));

    tracing::debug!(slug = %metadata.slug, "loaded article");
    Ok(Article { metadata, content })
}

/// Read every `*.md` file of `dir`, newest first.
///
/// Articles whose date cannot be read come last. Equal dates keep file
/// name order.
pub fn load_articles(dir: &Path, markdown: &MarkdownConfig) -> Result<Vec<Article>, ContentError> {
    let mut articles = files_with_extension(dir, "md")?
        .iter()
        .map(|path| load_article(path, markdown))
        .collect::<Result<Vec<_>, _>>()?;

    articles.sort_by_cached_key(|article| std::cmp::Reverse(article.metadata.published()));
    Ok(articles)
}
