//! A small mustache-style template engine.
//!
//! Templates are plain text with `{{ … }}` markers: interpolation with an
//! optional fallback, `#if` and `#each` blocks, and `{{> partial}}`
//! inclusion. A page template is rendered first, then injected into a
//! layout at `{{ content }}` and the whole page is rendered again.
//!
//! ```ignore
//! let mut engine = TemplateEngine::new("templates");
//! let html = engine.render("article", &Value::from(data))?;
//! ```

mod eval;
mod lexer;
mod parse;
mod partials;
mod path;
mod render;
mod source;
mod value;

pub use render::{RenderError, TemplateEngine};
pub use value::Value;
