//! `data.json` stage.

use serde_json::json;

use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};

/// Stage that writes `data.json`: article metadata, authors and the site
/// metadata, pretty-printed.
pub struct DataStage;

impl FinalizeStage for DataStage {
    fn name(&self) -> &'static str {
        "data"
    }

    fn finalize(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        let data = json!({
            "articles": ctx.article_metadata(),
            "authors": ctx.authors,
            "site": ctx.site,
        });

        std::fs::create_dir_all(ctx.output_dir)?;
        let path = ctx.output_dir.join("data.json");
        std::fs::write(&path, serde_json::to_string_pretty(&data)?)?;
        tracing::info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value as JsonValue, json};

    use super::*;
    use crate::build::pipeline::stages::fixture::Fixture;

    #[test]
    fn test_data_json() {
        let mut site = Fixture::new();
        site.authors.insert("ann".into(), json!({"name": "Ann"}));
        site.article("hello", json!({"title": "Hello", "author": "ann"}));

        site.with_context(|ctx| DataStage.finalize(ctx)).unwrap();

        let text = site.output("data.json");
        assert!(text.contains("\n  \"articles\""));

        let data: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(data["articles"][0]["title"], "Hello");
        assert_eq!(data["articles"][0]["tagLink"], "/news");
        assert_eq!(data["authors"]["ann"]["name"], "Ann");
        assert_eq!(data["site"]["baseUrl"], "https://example.com");
    }
}
