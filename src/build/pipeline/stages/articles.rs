//! Article page stage.

use serde_json::json;

use crate::build::content::fallback_author;
use crate::build::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that renders `articles/<slug>/index.html` for every article with
/// the `article` template.
///
/// A page that fails to render is logged and skipped.
pub struct ArticlesStage;

impl Stage for ArticlesStage {
    fn name(&self) -> &'static str {
        "articles"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let articles = ctx.articles;
        for article in articles {
            let meta = &article.metadata;
            let author = ctx
                .authors
                .get(&meta.author)
                .filter(|author| !author.is_null())
                .cloned()
                .unwrap_or_else(|| fallback_author(&meta.author));

            let data = json!({
                "article": meta,
                "author": author,
                "content": article.content,
            });

            let url = format!("/articles/{}", meta.slug);
            match ctx.render_to("article", &url, data) {
                Ok(()) => tracing::info!(slug = %meta.slug, "generated article"),
                Err(e) => tracing::error!(slug = %meta.slug, "failed to generate article: {e}"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::build::pipeline::stages::fixture::Fixture;

    #[test]
    fn test_article_pages() {
        let mut site = Fixture::new();
        site.template(
            "article",
            "<h1>{{article.title}}</h1><p>by {{author.name}}</p>{{content}}",
        );
        site.authors
            .insert("tofu".into(), json!({"name": "Tofu", "bio": "", "links": {}}));
        site.article("first", json!({"title": "First", "author": "tofu"}))
            .article("second", json!({"title": "Second", "author": "nobody"}));

        site.with_context(|ctx| ArticlesStage.process(ctx)).unwrap();

        assert_eq!(
            site.output("articles/first/index.html"),
            "<h1>First</h1><p>by Tofu</p><p>first body</p>"
        );
        assert_eq!(
            site.output("articles/second/index.html"),
            "<h1>Second</h1><p>by nobody</p><p>second body</p>"
        );
    }

    #[test]
    fn test_failed_article_is_skipped() {
        let mut site = Fixture::new();
        site.article("lonely", json!({}));

        let written = site
            .with_context(|ctx| ArticlesStage.process(ctx).map(|()| ctx.pages_written))
            .unwrap();

        assert_eq!(written, 0);
        assert!(!site.output_exists("articles/lonely/index.html"));
    }
}
