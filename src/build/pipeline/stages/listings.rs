//! Single-page listing stages: news, guides, games and about.

use serde_json::json;

use super::hero;
use crate::build::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that renders `news/index.html` with articles tagged `news`.
pub struct NewsStage;

impl Stage for NewsStage {
    fn name(&self) -> &'static str {
        "news"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let news: Vec<_> = ctx
            .article_metadata()
            .into_iter()
            .filter(|a| a.is_tagged("news"))
            .collect();
        tracing::debug!(count = news.len(), "news articles");

        let data = json!({
            "articles": news,
            "hero": hero(
                "/assets/images/hero-news.png",
                "Latest News",
                "Updates, announcements, and developments for the games we cover.",
            ),
        });
        ctx.render_to("news", "/news", data)
    }
}

/// Stage that renders `guides/index.html` with articles tagged `guide` or
/// `guides`.
pub struct GuidesStage;

impl Stage for GuidesStage {
    fn name(&self) -> &'static str {
        "guides"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let guides: Vec<_> = ctx
            .article_metadata()
            .into_iter()
            .filter(|a| a.is_tagged("guide") || a.is_tagged("guides"))
            .collect();
        tracing::debug!(count = guides.len(), "guide articles");

        let data = json!({
            "articles": guides,
            "hero": hero(
                "/assets/images/hero-guides.png",
                "Guides & Tutorials",
                "In-depth strategy, progression help, and knowledge for players.",
            ),
        });
        ctx.render_to("guides", "/guides", data)
    }
}

/// Stage that renders `games/index.html`.
///
/// `hasGames` and `noGames` let templates switch on an empty list, since
/// an empty sequence is truthy.
pub struct GamesStage;

impl Stage for GamesStage {
    fn name(&self) -> &'static str {
        "games"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let has_games = !ctx.games.is_empty();
        let data = json!({
            "games": ctx.games,
            "hasGames": has_games,
            "noGames": !has_games,
            "hero": hero(
                "/assets/images/hero-games.png",
                "Games",
                "Select a game to view all related articles.",
            ),
        });
        ctx.render_to("games", "/games", data)
    }
}

/// Stage that renders `about/index.html` with every author.
pub struct AboutStage;

impl Stage for AboutStage {
    fn name(&self) -> &'static str {
        "about"
    }

    fn process(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let data = json!({
            "authors": ctx.authors,
            "hero": hero(
                "/assets/images/hero-about.png",
                "About Us",
                "Learn more about our stuff.",
            ),
        });
        ctx.render_to("about", "/about", data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::build::content::GameMetadata;
    use crate::build::pipeline::stages::fixture::Fixture;

    const LISTING: &str = "{{hero.title}}|{{#each articles}}{{item.slug}};{{/each}}";

    #[test]
    fn test_news_and_guides_filter_by_tag() {
        let mut site = Fixture::new();
        site.template("news", LISTING).template("guides", LISTING);
        site.article("patch", json!({"tags": "NEWS"}))
            .article("untagged", json!({}))
            .article("boss", json!({"tags": ["Guide"]}))
            .article("route", json!({"tag": "guides"}))
            .article("review", json!({"tag": "Review"}));

        site.with_context(|ctx| {
            NewsStage.process(ctx)?;
            GuidesStage.process(ctx)
        })
        .unwrap();

        assert_eq!(site.output("news/index.html"), "Latest News|patch;untagged;");
        assert_eq!(
            site.output("guides/index.html"),
            "Guides & Tutorials|boss;route;"
        );
    }

    #[test]
    fn test_games_page_flags() {
        let mut site = Fixture::new();
        site.template(
            "games",
            "{{#if hasGames}}{{#each games}}{{item.title}} {{/each}}{{/if}}{{#if noGames}}none{{/if}}",
        );

        site.with_context(|ctx| GamesStage.process(ctx)).unwrap();
        assert_eq!(site.output("games/index.html"), "none");

        site.games
            .push(GameMetadata::from_json(&json!({"title": "Elden Ring"}), "er"));
        site.with_context(|ctx| GamesStage.process(ctx)).unwrap();
        assert_eq!(site.output("games/index.html"), "Elden Ring ");
    }

    #[test]
    fn test_about_page() {
        let mut site = Fixture::new();
        site.template("about", "{{hero.title}}: {{authors.ann.name}}");
        site.authors.insert("ann".into(), json!({"name": "Ann"}));

        site.with_context(|ctx| AboutStage.process(ctx)).unwrap();
        assert_eq!(site.output("about/index.html"), "About Us: Ann");
    }
}
