//! Configuration type definitions.
//!
//! This module contains the data structures read from `tofu.yaml`.
//! These types are pure data - no I/O or complex logic.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Top-level config
// =============================================================================

/// The whole site configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

// =============================================================================
// Site metadata
// =============================================================================

/// Site metadata, handed to every template as `site`.
///
/// Serializes with the key names templates use (`site.baseUrl`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(
        default = "default_base_url",
        rename(serialize = "baseUrl"),
        alias = "baseUrl",
        alias = "baseurl"
    )]
    pub base_url: String,
    /// Any other keys, passed through to templates untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_title() -> String {
    "Tofu's SSG".to_string()
}

fn default_description() -> String {
    "Static site generator from markdown files for a blog.".to_string()
}

fn default_base_url() -> String {
    "https://example.com".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            base_url: default_base_url(),
            extra: BTreeMap::new(),
        }
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Input and output directories, relative to the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Holds `articles/`, `authors/` and `games/`
    #[serde(default = "default_content")]
    pub content: PathBuf,
    /// Page templates, with `layouts/` and `partials/` below
    #[serde(default = "default_templates")]
    pub templates: PathBuf,
    /// Copied verbatim into the output directory
    #[serde(default = "default_static", rename = "static")]
    pub static_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_content() -> PathBuf {
    PathBuf::from("content")
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

fn default_static() -> PathBuf {
    PathBuf::from("static")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            templates: default_templates(),
            static_dir: default_static(),
            output: default_output(),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "definition_lists".to_string(),
        "footnotes".to_string(),
        "gfm".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}

// =============================================================================
// Development server configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// File watching configuration
    #[serde(default)]
    pub watch: WatchConfig,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    1337
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            watch: WatchConfig::default(),
        }
    }
}

/// Configuration for file watching during development.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Use polling-based watcher instead of native file system events.
    /// Useful for network filesystems, Docker volumes, or other situations
    /// where native events are unreliable.
    #[serde(default)]
    pub poll: bool,
    /// Poll interval in milliseconds (only used if poll=true).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Debounce timeout in milliseconds.
    /// Changes within this window are batched together.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll: false,
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
