//! Category page stage.

use std::collections::HashMap;

use serde_json::json;

use super::hero;
use crate::build::content::ArticleMetadata;
use crate::build::pipeline::{PipelineContext, PipelineError, Stage};
use crate::util::slugify;

/// Hero image of a category without a matching game.
const DEFAULT_CATEGORY_IMAGE: &str = "/assets/images/hero-games.png";

/// Stage that renders `categories/<slug>/index.html` for every category
/// with the `category` template.
///
/// Categories whose names share a slug are one category, named after the
/// first spelling seen. A game whose slug or slugified title equals the
/// category slug provides the hero image.
pub struct CategoriesStage;

struct Category<'a> {
    name: String,
    slug: String,
    articles: Vec<&'a ArticleMetadata>,
}

impl Stage for CategoriesStage {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let mut images: HashMap<String, Option<&str>> = HashMap::new();
        for game in ctx.games {
            images.insert(game.slug.clone(), game.image_url());
            images.insert(slugify(&game.title), game.image_url());
        }

        let categories = group_by_category(ctx.article_metadata());
        tracing::debug!(count = categories.len(), "categories");

        for category in categories {
            let image = images
                .get(&category.slug)
                .copied()
                .flatten()
                .unwrap_or(DEFAULT_CATEGORY_IMAGE);

            let data = json!({
                "category": category.name,
                "categorySlug": category.slug,
                "articles": category.articles,
                "hero": hero(
                    image,
                    &category.name,
                    &format!("Articles related to {}", category.name),
                ),
            });
            ctx.render_to("category", &format!("/categories/{}", category.slug), data)?;
        }
        Ok(())
    }
}

/// Group articles by category slug, in first-seen order.
fn group_by_category(articles: Vec<&ArticleMetadata>) -> Vec<Category<'_>> {
    let mut categories: Vec<Category> = Vec::new();
    let mut by_slug: HashMap<String, usize> = HashMap::new();

    for article in articles {
        for name in &article.categories {
            let slug = slugify(name);
            let index = *by_slug.entry(slug.clone()).or_insert_with(|| {
                categories.push(Category {
                    name: name.clone(),
                    slug,
                    articles: Vec::new(),
                });
                categories.len() - 1
            });
            categories[index].articles.push(article);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::build::content::GameMetadata;
    use crate::build::pipeline::stages::fixture::Fixture;

    #[test]
    fn test_category_pages() {
        let mut site = Fixture::new();
        site.template(
            "category",
            "{{category}}|{{categorySlug}}|{{hero.image}}|{{hero.subtitle}}|\
             {{#each articles}}{{item.slug}};{{/each}}",
        );
        site.games.push(GameMetadata::from_json(
            &json!({"title": "Elden Ring", "slug": "er", "image": "/img/er.png"}),
            "er",
        ));
        site.article("a", json!({"categories": ["Elden Ring", "Indie"]}))
            .article("b", json!({"categories": ["elden ring"]}))
            .article("c", json!({"categories": ["Indie", "Indie"]}));

        site.with_context(|ctx| CategoriesStage.process(ctx)).unwrap();

        assert_eq!(
            site.output("categories/elden-ring/index.html"),
            "Elden Ring|elden-ring|/img/er.png|Articles related to Elden Ring|a;b;"
        );
        assert_eq!(
            site.output("categories/indie/index.html"),
            "Indie|indie|/assets/images/hero-games.png|Articles related to Indie|a;c;"
        );
    }

    #[test]
    fn test_no_categories_no_pages() {
        let mut site = Fixture::new();
        site.article("a", json!({}));

        let written = site
            .with_context(|ctx| CategoriesStage.process(ctx).map(|()| ctx.pages_written))
            .unwrap();
        assert_eq!(written, 0);
    }
}
