//! Build pipeline for page generation.
//!
//! The pipeline renders the site through a series of stages:
//! 1. Home page
//! 2. One page per article
//! 3. One page per author
//! 4. News, guides, games and about listings
//! 5. One page per category
//!
//! Build-wide stages run after all pages are written: copying static
//! files and writing `data.json`.

mod context;
mod error;
mod stages;

pub use context::PipelineContext;
pub use error::PipelineError;

use stages::{
    AboutStage, ArticlesStage, AuthorsStage, CategoriesStage, DataStage, GamesStage,
    GuidesStage, IndexStage, NewsStage, StaticStage,
};

/// A stage in the page generation pipeline.
///
/// Stages run sequentially over the shared context. Each one renders and
/// writes its own pages.
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Generate this stage's pages.
    ///
    /// An error aborts the build. Stages that produce many pages may log
    /// a failed page and carry on instead.
    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError>;
}

/// A stage that runs once after all pages are written.
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run finalization after all pages are written.
    fn finalize(&self, ctx: &PipelineContext) -> Result<(), PipelineError>;
}

/// The page generation pipeline.
///
/// The default pipeline is:
/// index → articles → authors → news → guides → games → about → categories,
/// then the `static` and `data` finalize stages.
pub struct Pipeline {
    /// Page stages, run in order
    stages: Vec<Box<dyn Stage>>,
    /// Build-wide stages (run once after all pages)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(IndexStage)
            .add_stage(ArticlesStage)
            .add_stage(AuthorsStage)
            .add_stage(NewsStage)
            .add_stage(GuidesStage)
            .add_stage(GamesStage)
            .add_stage(AboutStage)
            .add_stage(CategoriesStage);
        pipeline
            .add_finalize_stage(StaticStage)
            .add_finalize_stage(DataStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a finalize stage (runs after all pages are written).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run every stage, then every finalize stage.
    pub fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "running stage");
            stage.process(ctx)?;
        }

        for stage in &self.finalize_stages {
            tracing::debug!(stage = stage.name(), "running finalize stage");
            stage.finalize(ctx)?;
        }

        Ok(())
    }

    /// Get the names of all stages in order, finalize stages last.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .map(|s| s.name())
            .chain(self.finalize_stages.iter().map(|s| s.name()))
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
