//! The render entry point: page template, then layout.

use std::path::PathBuf;

use super::eval::substitute;
use super::lexer::{Marker, Token, tokenize};
use super::partials::expand_partials;
use super::source::{ContentLoader, FsLoader, LoadError, SourceCache, SourceKind};
use super::value::{Mapping, Value};

/// Layout used by [`TemplateEngine::render`].
pub const DEFAULT_LAYOUT: &str = "default";

/// Navigation entries flagged in `site.currentPage`.
const NAV_PAGES: [&str; 5] = ["home", "articles", "guides", "games", "about"];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("cannot render '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: LoadError,
    },
}

/// Renders named templates into their layouts.
///
/// Owns the source cache, so one engine should be built per generation
/// run and reused for every page.
pub struct TemplateEngine<L = FsLoader> {
    cache: SourceCache<L>,
}

impl TemplateEngine<FsLoader> {
    /// Engine reading from a templates directory laid out as
    /// `<name>.html`, `layouts/<name>.html` and `partials/<name>.html`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self::with_loader(FsLoader::new(templates_dir))
    }
}

impl<L: ContentLoader> TemplateEngine<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            cache: SourceCache::new(loader),
        }
    }

    /// Render `template` inside the default layout.
    pub fn render(&mut self, template: &str, context: &Value) -> Result<String, RenderError> {
        self.render_with_layout(template, context, DEFAULT_LAYOUT)
    }

    /// Render `template` inside `layout`.
    ///
    /// The template is expanded (partials, then data) on its own first.
    /// The result replaces every `{{ content }}` marker of the layout, and
    /// the assembled text goes through partial and data expansion again.
    /// A layout that cannot be loaded is not an error: the rendered
    /// template is returned as is.
    pub fn render_with_layout(
        &mut self,
        template: &str,
        context: &Value,
        layout: &str,
    ) -> Result<String, RenderError> {
        tracing::debug!(template, layout, "rendering");
        let context = with_current_page(template, context);

        let source = self
            .cache
            .load(SourceKind::Template, template)
            .map_err(|source| RenderError::Template {
                name: template.to_string(),
                source,
            })?
            .to_string();

        let source = expand_partials(&source, &mut self.cache);
        let body = substitute(&source, &context);

        let layout_source = match self.cache.load(SourceKind::Layout, layout) {
            Ok(layout_source) => layout_source.to_string(),
            Err(e) => {
                tracing::info!("{e}, returning template '{template}' without a layout");
                return Ok(body);
            }
        };

        let page = inject_content(&layout_source, &body);
        let page = expand_partials(&page, &mut self.cache);
        Ok(substitute(&page, &context))
    }

    #[cfg(test)]
    pub fn cache(&self) -> &SourceCache<L> {
        &self.cache
    }
}

/// Replace every `{{ content }}` marker in `layout` with `body`.
fn inject_content(layout: &str, body: &str) -> String {
    let mut out = String::with_capacity(layout.len() + body.len());
    for token in tokenize(layout) {
        match token {
            Token::Marker {
                marker:
                    Marker::Var {
                        path: "content",
                        fallback: None,
                    },
                ..
            } => out.push_str(body),
            other => out.push_str(other.raw()),
        }
    }
    out
}

/// Which navigation entry a template belongs to.
///
/// Exactly one of [`NAV_PAGES`] is true when the template is known, or
/// when the context carries an `article`; otherwise all are false.
pub fn current_page(template: &str, context: &Value) -> Mapping {
    let active = match template {
        "index" => Some("home"),
        "article" | "news" => Some("articles"),
        "guides" => Some("guides"),
        "games" => Some("games"),
        "about" => Some("about"),
        _ if context.get("article").is_some_and(Value::is_truthy) => Some("articles"),
        _ => None,
    };

    NAV_PAGES
        .iter()
        .map(|page| (page.to_string(), Value::Bool(active == Some(*page))))
        .collect()
}

/// Copy of `context` with `site.currentPage` filled in.
fn with_current_page(template: &str, context: &Value) -> Value {
    let mut enhanced = context.as_mapping().cloned().unwrap_or_default();
    let mut site = match enhanced.remove("site") {
        Some(Value::Mapping(site)) => site,
        _ => Mapping::new(),
    };
    site.insert(
        "currentPage".to_string(),
        Value::Mapping(current_page(template, context)),
    );
    enhanced.insert("site".to_string(), Value::Mapping(site));
    Value::Mapping(enhanced)
}
