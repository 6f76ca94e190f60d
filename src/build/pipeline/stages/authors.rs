//! Author page stage.

use serde_json::json;

use crate::build::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that renders `authors/<id>/index.html` for every author with the
/// `author` template, listing the articles they wrote.
///
/// A page that fails to render is logged and skipped.
pub struct AuthorsStage;

impl Stage for AuthorsStage {
    fn name(&self) -> &'static str {
        "authors"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let authors = ctx.authors;
        for (id, author) in authors {
            let written: Vec<_> = ctx
                .articles
                .iter()
                .map(|a| &a.metadata)
                .filter(|meta| &meta.author == id)
                .collect();

            let data = json!({
                "author": author,
                "articles": written,
            });

            match ctx.render_to("author", &format!("/authors/{id}"), data) {
                Ok(()) => tracing::info!(author = %id, "generated author page"),
                Err(e) => tracing::error!(author = %id, "failed to generate author page: {e}"),
            }
        }
        Ok(())
    }
}
