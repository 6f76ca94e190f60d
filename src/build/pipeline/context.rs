//! Pipeline context for sharing state across stages.

use std::path::Path;

use serde_json::Value as JsonValue;

use crate::build::content::{Article, ArticleMetadata, Authors, GameMetadata};
use crate::build::paths::url_to_output_path;
use crate::build::pipeline::PipelineError;
use crate::config::SiteConfig;
use crate::engine::{TemplateEngine, Value};

/// Shared context for pipeline stages.
///
/// Holds the loaded site content, the template engine and the output
/// location. Stages read content from here and write pages through it.
pub struct PipelineContext<'a> {
    // === Output configuration ===
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Directory copied verbatim into the output
    pub static_dir: &'a Path,

    // === Site-level data ===
    /// Site metadata, serialized once with the keys templates use
    pub site: JsonValue,

    /// Articles, newest first
    pub articles: &'a [Article],

    pub authors: &'a Authors,

    pub games: &'a [GameMetadata],

    // === Services ===
    /// Template engine (needs mutable access for its source cache)
    pub engine: &'a mut TemplateEngine,

    /// Number of pages written so far
    pub pages_written: usize,
}

impl<'a> PipelineContext<'a> {
    /// Create a new pipeline context.
    pub fn new(
        output_dir: &'a Path,
        static_dir: &'a Path,
        site: &SiteConfig,
        articles: &'a [Article],
        authors: &'a Authors,
        games: &'a [GameMetadata],
        engine: &'a mut TemplateEngine,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            output_dir,
            static_dir,
            site: serde_json::to_value(site)?,
            articles,
            authors,
            games,
            engine,
            pages_written: 0,
        })
    }

    /// Metadata of every article, in article order.
    pub fn article_metadata(&self) -> Vec<&'a ArticleMetadata> {
        self.articles.iter().map(|a| &a.metadata).collect()
    }

    /// Render `template` with `data` plus the site metadata as `site`.
    pub fn render_page(
        &mut self,
        template: &str,
        mut data: JsonValue,
    ) -> Result<String, PipelineError> {
        if let Some(map) = data.as_object_mut() {
            map.insert("site".to_string(), self.site.clone());
        }
        let context = Value::from(data);
        Ok(self.engine.render(template, &context)?)
    }

    /// Write a page to the output path of `url_path`.
    pub fn write_page(&mut self, url_path: &str, html: &str) -> Result<(), PipelineError> {
        let output_path = url_to_output_path(url_path, self.output_dir);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output_path, html)?;

        self.pages_written += 1;
        tracing::info!("wrote {}", output_path.display());
        Ok(())
    }

    /// Render a page and write it to `url_path`.
    pub fn render_to(
        &mut self,
        template: &str,
        url_path: &str,
        data: JsonValue,
    ) -> Result<(), PipelineError> {
        let html = self.render_page(template, data)?;
        self.write_page(url_path, &html)
    }
}
