//! Home page stage.

use serde_json::json;

use super::hero;
use crate::build::pipeline::{PipelineContext, PipelineError, Stage};

/// Featured articles shown on the home page.
const FEATURED_LIMIT: usize = 3;
/// Recent articles shown on the home page.
const RECENT_LIMIT: usize = 6;

/// Stage that renders `index.html` with the `index` template.
///
/// The home page is required: a failure here aborts the build.
pub struct IndexStage;

impl Stage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let articles = ctx.article_metadata();
        let featured: Vec<_> = articles
            .iter()
            .filter(|a| a.featured)
            .take(FEATURED_LIMIT)
            .collect();
        let recent: Vec<_> = articles.iter().take(RECENT_LIMIT).collect();

        tracing::debug!(
            featured = featured.len(),
            recent = recent.len(),
            authors = ctx.authors.len(),
            total = articles.len(),
            "home page data"
        );

        let data = json!({
            "featuredArticles": featured,
            "articles": recent,
            "authors": ctx.authors,
            "hero": hero(
                "/assets/images/hero.png",
                ctx.site["title"].as_str().unwrap_or_default(),
                ctx.site["description"].as_str().unwrap_or_default(),
            ),
        });

        ctx.render_to("index", "/", data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::build::pipeline::stages::fixture::Fixture;

    #[test]
    fn test_index_page() {
        let mut site = Fixture::new();
        site.template(
            "index",
            "<h1>{{hero.title}}</h1>{{#each featuredArticles}}[{{item.slug}}]{{/each}}\
             {{#each articles}}({{item.slug}}){{/each}}",
        );
        for i in 0..8 {
            site.article(&format!("a{i}"), json!({"featured": i % 2 == 0}));
        }

        site.with_context(|ctx| IndexStage.process(ctx)).unwrap();

        let html = site.output("index.html");
        assert_eq!(
            html,
            "<h1>Tofu's SSG</h1>[a0][a2][a4](a0)(a1)(a2)(a3)(a4)(a5)"
        );
    }

    #[test]
    fn test_missing_index_template_is_fatal() {
        let mut site = Fixture::new();
        let result = site.with_context(|ctx| IndexStage.process(ctx));
        assert!(matches!(result, Err(PipelineError::Render(_))));
    }
}
