//! Front matter extraction.

use serde_json::{Map, Value as JsonValue};

/// Front matter keys and values, as JSON so they can flow straight into
/// render contexts and `data.json`.
pub type FrontMatter = Map<String, JsonValue>;

/// Result of parsing front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The markdown content without the front matter block
    pub content: String,
}

/// Parse front matter from markdown content.
///
/// Front matter is a YAML block delimited by `---` at the start of the file:
///
/// ```markdown
/// ---
/// title: My Post
/// author: tofu
/// categories: [News, Elden Ring]
/// ---
///
/// # Content starts here
/// ```
///
/// Returns the parsed front matter and the remaining content. Front matter
/// that is not a YAML mapping is ignored with a warning.
pub fn parse_front_matter(content: &str) -> ParsedContent {
    let content = content.trim_start();

    // Check if content starts with front matter delimiter
    if !content.starts_with("---") {
        return ParsedContent {
            front_matter: FrontMatter::new(),
            content: content.to_string(),
        };
    }

    // Find the closing delimiter
    let after_opening = &content[3..];
    let Some(closing_pos) = after_opening.find("\n---") else {
        // No closing delimiter found, treat entire content as markdown
        return ParsedContent {
            front_matter: FrontMatter::new(),
            content: content.to_string(),
        };
    };

    let yaml_content = after_opening[..closing_pos].trim_start_matches(['\r', '\n']);

    // Skip the closing delimiter and the rest of its line
    let after_closing = &after_opening[closing_pos + 4..];
    let markdown_content = match after_closing.find('\n') {
        Some(newline) => after_closing[newline + 1..].trim_start_matches(['\r', '\n']),
        None => "",
    };

    ParsedContent {
        front_matter: parse_yaml_mapping(yaml_content),
        content: markdown_content.to_string(),
    }
}

fn parse_yaml_mapping(yaml: &str) -> FrontMatter {
    if yaml.trim().is_empty() {
        return FrontMatter::new();
    }

    let parsed = serde_yaml::from_str::<serde_yaml::Value>(yaml)
        .map_err(|e| e.to_string())
        .and_then(|value| serde_json::to_value(value).map_err(|e| e.to_string()));

    match parsed {
        Ok(JsonValue::Object(map)) => map,
        Ok(JsonValue::Null) => FrontMatter::new(),
        Ok(other) => {
            tracing::warn!("front matter is not a mapping, ignoring it: {other}");
            FrontMatter::new()
        }
        Err(e) => {
            tracing::warn!("failed to parse front matter: {e}");
            FrontMatter::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter_basic() {
        let content = r#"---
title: My Page
description: A test page
---

# Hello World
"#;
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter["title"], "My Page");
        assert_eq!(parsed.front_matter["description"], "A test page");
        assert_eq!(parsed.content, "# Hello World\n");
    }

    #[test]
    fn test_parse_front_matter_with_lists() {
        let content = r#"---
title: Custom Page
featured: true
categories:
  - rust
  - documentation
---
Content here
"#;
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter["featured"], true);
        assert_eq!(parsed.front_matter["categories"][1], "documentation");
        assert_eq!(parsed.content, "Content here\n");
    }

    #[test]
    fn test_parse_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert!(parsed.content.starts_with("# Just Markdown"));
    }

    #[test]
    fn test_parse_front_matter_empty_front_matter() {
        let content = "---\n---\n\n# Content";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.content, "# Content");
    }

    #[test]
    fn test_invalid_front_matter_is_ignored() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let parsed = parse_front_matter(content);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.content, "body");
    }

    #[test]
    fn test_scalar_front_matter_is_ignored() {
        let parsed = parse_front_matter("---\njust text\n---\nbody");
        assert!(parsed.front_matter.is_empty());
    }
}
