use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::engine::TemplateEngine;

use super::content::{ContentError, load_articles, load_authors, load_games};
use super::paths::resolve_path;
use super::pipeline::{Pipeline, PipelineContext, PipelineError};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    pub articles: usize,
    pub authors: usize,
    pub games: usize,
    pub pages: usize,
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build steps:
        // 1. Load articles, authors and games
        // 2. Clear the output directory
        // 3. Run the page pipeline (pages, static files, data.json)

        self.config.validate_paths(&self.base_path)?;

        let content_dir = self.resolve(&self.config.paths.content);
        let articles_dir = content_dir.join("articles");
        let authors_dir = content_dir.join("authors");
        std::fs::create_dir_all(&articles_dir)?;
        std::fs::create_dir_all(&authors_dir)?;

        // Step 1: Load content
        println!("Parsing articles...");
        let articles = load_articles(&articles_dir, &self.config.markdown)?;
        println!("Found {} article(s)", articles.len());

        println!("Loading authors...");
        let authors = load_authors(&authors_dir)?;
        println!("Found {} author(s)", authors.len());

        let games = load_games(&content_dir.join("games"));
        tracing::debug!(count = games.len(), "loaded games");

        // Step 2: Start from an empty output directory
        let output_dir = self.output_dir();
        if output_dir.exists() {
            std::fs::remove_dir_all(&output_dir)?;
        }
        std::fs::create_dir_all(&output_dir)?;

        // Step 3: Render and write
        let mut engine = TemplateEngine::new(self.resolve(&self.config.paths.templates));
        let static_dir = self.resolve(&self.config.paths.static_dir);
        let mut ctx = PipelineContext::new(
            &output_dir,
            &static_dir,
            &self.config.site,
            &articles,
            &authors,
            &games,
            &mut engine,
        )?;

        let pipeline = Pipeline::default_pipeline();
        tracing::debug!(stages = ?pipeline.stage_names(), "running pipeline");
        pipeline.run(&mut ctx)?;
        let pages = ctx.pages_written;

        let display_output = output_dir.canonicalize().unwrap_or(output_dir.clone());
        println!("Wrote {} page(s) to {}", pages, display_output.display());

        Ok(BuildResult {
            output_dir,
            articles: articles.len(),
            authors: authors.len(),
            games: games.len(),
            pages,
        })
    }

    /// Get the output directory path, resolved against base_path.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.output)
    }

    fn resolve(&self, path: &std::path::Path) -> PathBuf {
        resolve_path(&self.base_path, path)
    }
}
