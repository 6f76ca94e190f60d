//! Evaluation of parsed templates against a render context.
//!
//! Scoping inside `{{#each}}` bodies is deliberately narrow. The current
//! element is bound as `item`, but only two constructs see it:
//!
//! - `{{ item.… }}` plain interpolations
//! - `{{#if item.… }}` conditionals, tested against the element itself
//!
//! Everything else in a loop body, including `{{ item.x || "…" }}`
//! fallback interpolations and the paths of nested `{{#each}}` blocks,
//! resolves against the outer context and so renders the same for every
//! element.

use std::borrow::Cow;

use super::lexer::Fallback;
use super::parse::{ITEM_PREFIX, Node, parse};
use super::path::{resolve, walk};
use super::value::Value;

/// Parse and evaluate `src` against `context`.
pub fn substitute(src: &str, context: &Value) -> String {
    let nodes = parse(src);
    let mut out = String::with_capacity(src.len());
    eval(
        &nodes,
        &Scope {
            root: context,
            item: None,
        },
        &mut out,
    );
    out
}

#[derive(Clone, Copy)]
struct Scope<'a> {
    root: &'a Value,
    /// The current `{{#each}}` element, if inside one.
    item: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    /// The path below `item.` when it refers to the current element.
    fn item_path<'p>(&self, path: &'p str) -> Option<(&'a Value, &'p str)> {
        let item = self.item?;
        path.strip_prefix(ITEM_PREFIX).map(|rest| (item, rest))
    }

    fn variable(&self, path: &str) -> Cow<'a, Value> {
        match self.item_path(path) {
            Some((item, rest)) => walk(item, rest.split('.')),
            None => resolve(self.root, path),
        }
    }

    fn condition(&self, path: &str) -> Cow<'a, Value> {
        match self.item_path(path) {
            Some((item, rest)) => resolve(item, rest),
            None => resolve(self.root, path),
        }
    }
}

fn eval(nodes: &[Node<'_>], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var {
                path,
                fallback: None,
            } => out.push_str(&scope.variable(path).render_text()),
            Node::Var {
                path,
                fallback: Some(fallback),
            } => {
                let primary = resolve(scope.root, path);
                if primary.is_truthy() {
                    out.push_str(&primary.to_string());
                    continue;
                }
                match fallback {
                    Fallback::Literal(literal) => out.push_str(literal),
                    Fallback::Path(other) => {
                        out.push_str(&resolve(scope.root, other).render_text())
                    }
                }
            }
            Node::If { path, body } => {
                if scope.condition(path).is_truthy() {
                    eval(body, scope, out);
                }
            }
            Node::Each { path, body } => {
                let items = resolve(scope.root, path);
                let Some(items) = items.as_sequence() else {
                    continue;
                };
                for item in items {
                    let item_scope = Scope {
                        root: scope.root,
                        item: Some(item),
                    };
                    eval(body, &item_scope, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(src: &str, context: serde_json::Value) -> String {
        substitute(src, &Value::from(context))
    }

    #[test]
    fn test_each_renders_per_item_in_order() {
        let ctx = json!({"articles": [{"title": "A", "featured": true}, {"title": "B", "featured": false}]});
        assert_eq!(
            render(
                "{{#each articles}}{{#if item.featured}}*{{/if}}{{item.title}};{{/each}}",
                ctx
            ),
            "*A;B;"
        );
    }

    #[test]
    fn test_each_over_empty_or_non_sequence_renders_nothing() {
        let src = "[{{#each xs}}x{{/each}}]";
        assert_eq!(render(src, json!({"xs": []})), "[]");
        assert_eq!(render(src, json!({"xs": "abc"})), "[]");
        assert_eq!(render(src, json!({"xs": {"a": 1}})), "[]");
        assert_eq!(render(src, json!({})), "[]");
    }

    #[test]
    fn test_sibling_loops() {
        let ctx = json!({"a": [1, 2], "b": ["x"]});
        assert_eq!(
            render("{{#each a}}({{item}}){{/each}}-{{#each b}}<{{ item.length }}>{{/each}}", ctx),
            "()()-<1>"
        );
    }

    #[test]
    fn test_outer_markers_in_loop_use_outer_context() {
        let ctx = json!({"site": {"title": "T"}, "item": {"name": "outer"}, "xs": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(
            render("{{#each xs}}{{ site.title }}:{{ item.name }}/{{ item.name || \"none\" }} {{/each}}", ctx),
            "T:a/outer T:b/outer "
        );
    }

    #[test]
    fn test_fallback_inside_loop_ignores_item() {
        let ctx = json!({"xs": [{"title": "real"}]});
        assert_eq!(
            render("{{#each xs}}{{ item.title || \"Untitled\" }}{{/each}}", ctx),
            "Untitled"
        );
    }

    #[test]
    fn test_item_conditional_requires_structured_item() {
        let ctx = json!({"xs": ["abc", ""]});
        assert_eq!(
            render("{{#each xs}}[{{#if item.length}}y{{/if}}{{item.length}}]{{/each}}", ctx),
            "[3][]"
        );
    }

    #[test]
    fn test_outer_conditional_in_loop() {
        let ctx = json!({"show": true, "xs": [{"n": 1}, {"n": 2}]});
        assert_eq!(
            render("{{#each xs}}{{#if show}}{{item.n}}{{/if}}{{/each}}", ctx),
            "12"
        );
    }

    #[test]
    fn test_conditionals_follow_js_truthiness() {
        let src = "{{#if v}}Y{{/if}}";
        assert_eq!(render(src, json!({"v": 1})), "Y");
        assert_eq!(render(src, json!({"v": "x"})), "Y");
        assert_eq!(render(src, json!({"v": []})), "Y");
        assert_eq!(render(src, json!({"v": 0})), "");
        assert_eq!(render(src, json!({"v": ""})), "");
        assert_eq!(render(src, json!({"v": false})), "");
        assert_eq!(render(src, json!({})), "");
    }

    #[test]
    fn test_variables() {
        let ctx = json!({"n": 0, "f": false, "s": "hi", "x": 2.5, "list": ["a", "b"]});
        assert_eq!(render("{{n}}|{{f}}|{{ s }}|{{x}}|{{list}}|{{missing.deep}}", ctx), "||hi|2.5|a,b|");
    }

    #[test]
    fn test_fallback_variables() {
        let ctx = json!({"a": 0, "b": "bee", "c": "sea"});
        assert_eq!(render("{{ a || \"lit\" }}", ctx.clone()), "lit");
        assert_eq!(render("{{ b || \"lit\" }}", ctx.clone()), "bee");
        assert_eq!(render("{{ a || c }}", ctx.clone()), "sea");
        assert_eq!(render("{{ a || missing }}", ctx.clone()), "");
        assert_eq!(render("{{ a || \"\" }}", ctx), "");
    }

    #[test]
    fn test_nested_loop_path_resolves_against_outer_context() {
        let ctx = json!({
            "outer": [{"name": "o1", "children": ["nope"]}],
            "inner": [{"name": "i1"}, {"name": "i2"}]
        });
        assert_eq!(
            render(
                "{{#each outer}}{{item.name}}:{{#each inner}}{{item.name}},{{/each}}{{#each item.children}}!{{/each}}{{/each}}",
                ctx
            ),
            "o1:i1,i2,"
        );
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        assert_eq!(
            render("{{#if a}}open {{ name }}", json!({"a": true, "name": "n"})),
            "{{#if a}}open n"
        );
    }

    #[test]
    fn test_nested_conditional_left_for_next_pass() {
        let src = "{{#if a}}1{{#if b}}2{{/if}}3{{/if}}";
        assert_eq!(render(src, json!({"a": true, "b": false})), "1{{#if b}}23{{/if}}");
        assert_eq!(render(src, json!({"a": false, "b": true})), "3{{/if}}");
    }

    #[test]
    fn test_item_conditional_inside_outer_conditional() {
        let ctx = json!({"show": true, "xs": [{"on": true}, {"on": false}]});
        assert_eq!(
            render("{{#each xs}}{{#if show}}[{{#if item.on}}on{{/if}}]{{/if}}{{/each}}", ctx),
            "[on][]"
        );
    }

    #[test]
    fn test_inserted_values_are_not_reevaluated() {
        let ctx = json!({"body": "{{ secret }}", "secret": "s"});
        assert_eq!(render("{{ body }}", ctx), "{{ secret }}");
    }
}
