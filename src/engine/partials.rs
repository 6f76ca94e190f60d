//! Inlining of `{{> name}}` partials.
//!
//! Each inclusion marker is replaced at its own position by the partial's
//! body, which is expanded in turn before being inserted. An explicit
//! stack of the partials currently being expanded guards against cycles
//! and runaway nesting; a marker that would recurse is dropped with a
//! warning.

use super::lexer::{Marker, Token, tokenize};
use super::source::{ContentLoader, SourceCache};

/// Deepest chain of partials including partials.
const MAX_DEPTH: usize = 32;

/// Replace every partial marker in `text` with the fully expanded partial.
///
/// The result contains no partial markers, so expanding it again is a
/// no-op.
pub fn expand_partials<L: ContentLoader>(text: &str, cache: &mut SourceCache<L>) -> String {
    let mut stack = Vec::new();
    expand(text, cache, &mut stack)
}

fn expand<L: ContentLoader>(
    text: &str,
    cache: &mut SourceCache<L>,
    stack: &mut Vec<String>,
) -> String {
    let mut out = String::with_capacity(text.len());

    for token in tokenize(text) {
        let Token::Marker {
            marker: Marker::Partial(name),
            ..
        } = token
        else {
            out.push_str(token.raw());
            continue;
        };

        if stack.iter().any(|open| open == name) {
            tracing::warn!(
                "partial {name} includes itself (via {}), dropping the inclusion",
                stack.join(" > ")
            );
            continue;
        }
        if stack.len() >= MAX_DEPTH {
            tracing::warn!("partial {name} nested deeper than {MAX_DEPTH} levels, dropping it");
            continue;
        }

        tracing::debug!(partial = name, "expanding partial");
        let body = cache.load_partial(name);
        stack.push(name.to_string());
        let expanded = expand(&body, cache, stack);
        stack.pop();
        out.push_str(&expanded);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::source::{MemoryLoader, SourceKind};

    fn cache(partials: &[(&str, &str)]) -> SourceCache<MemoryLoader> {
        let mut loader = MemoryLoader::new();
        for (name, body) in partials {
            loader.insert(SourceKind::Partial, name, body);
        }
        SourceCache::new(loader)
    }

    #[test]
    fn test_inlines_partials() {
        let mut cache = cache(&[("header", "<header>{{ site.title }}</header>")]);
        assert_eq!(
            expand_partials("{{> header}}<main/>", &mut cache),
            "<header>{{ site.title }}</header><main/>"
        );
    }

    #[test]
    fn test_nested_partials() {
        let mut cache = cache(&[("a", "[{{> b}}]"), ("b", "<{{> c}}>"), ("c", "c")]);
        assert_eq!(expand_partials("{{>a}}", &mut cache), "[<c>]");
    }

    #[test]
    fn test_repeated_partial_replaced_in_place() {
        let mut cache = cache(&[("sep", "|")]);
        assert_eq!(
            expand_partials("a{{> sep}}b{{>sep}}c{{ > sep }}", &mut cache),
            "a|b|c|"
        );
    }

    #[test]
    fn test_missing_partial_renders_empty() {
        let mut cache = cache(&[]);
        assert_eq!(expand_partials("x{{>nope}}y", &mut cache), "xy");
    }

    #[test]
    fn test_cycles_terminate() {
        let mut cache = cache(&[("ping", "ping {{> pong}}"), ("pong", "pong {{> ping}}")]);
        assert_eq!(expand_partials("{{> ping}}", &mut cache), "ping pong ");
    }

    #[test]
    fn test_idempotent_after_expansion() {
        let mut cache = cache(&[("nav", "<nav>{{> link}}</nav>"), ("link", "<a/>")]);
        let once = expand_partials("{{> nav}} {{ content }}", &mut cache);
        let twice = expand_partials(&once, &mut cache);
        assert_eq!(once, twice);
    }
}
