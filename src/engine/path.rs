//! Dotted path resolution against a render context.
//!
//! Resolution folds over the segments left to right. Once the running
//! value is falsy the walk stops and that falsy value is the result, so
//! `a.b.c` over `{a: 0}` yields `0` rather than a generic "missing".

use std::borrow::Cow;

use super::value::Value;

/// Resolve `path` against `context`.
///
/// Returns [`Value::Null`] when the path is empty or `context` is not a
/// sequence or mapping.
pub fn resolve<'a>(context: &'a Value, path: &str) -> Cow<'a, Value> {
    if path.is_empty() || !context.is_indexable() {
        return Cow::Owned(Value::Null);
    }
    walk(context, path.split('.'))
}

/// Walk `segments` starting from `start`, short-circuiting on the first
/// falsy value.
///
/// Unlike [`resolve`], `start` may be any value; indexing a scalar simply
/// finds nothing (apart from `length` and character indices on strings).
pub fn walk<'a, 's>(start: &'a Value, segments: impl IntoIterator<Item = &'s str>) -> Cow<'a, Value> {
    let mut current = Cow::Borrowed(start);
    for segment in segments {
        if !current.is_truthy() {
            break;
        }
        current = match current {
            Cow::Borrowed(value) => property(value, segment),
            Cow::Owned(value) => Cow::Owned(property(&value, segment).into_owned()),
        };
    }
    current
}

/// A single property access.
fn property<'a>(value: &'a Value, key: &str) -> Cow<'a, Value> {
    let found = match value {
        Value::Mapping(map) => map.get(key).map(Cow::Borrowed),
        Value::Sequence(items) if key == "length" => {
            Some(Cow::Owned(Value::Number(items.len() as f64)))
        }
        Value::Sequence(items) => array_index(key)
            .and_then(|i| items.get(i))
            .map(Cow::Borrowed),
        Value::String(s) if key == "length" => {
            Some(Cow::Owned(Value::Number(s.encode_utf16().count() as f64)))
        }
        Value::String(s) => array_index(key)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Cow::Owned(Value::String(c.to_string()))),
        _ => None,
    };
    found.unwrap_or(Cow::Owned(Value::Null))
}

/// Parse a canonical array index ("0", "12"; not "01" or "+1").
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(value: serde_json::Value) -> Value {
        Value::from(value)
    }

    #[test]
    fn test_resolves_nested_keys() {
        let context = ctx(json!({"site": {"title": "Tofu", "meta": {"lang": "en"}}}));
        assert_eq!(*resolve(&context, "site.title"), Value::from("Tofu"));
        assert_eq!(*resolve(&context, "site.meta.lang"), Value::from("en"));
        assert_eq!(*resolve(&context, "site.missing"), Value::Null);
        assert_eq!(*resolve(&context, "nope.deeper.still"), Value::Null);
    }

    #[test]
    fn test_falsy_value_propagates() {
        let context = ctx(json!({"a": null, "zero": 0, "off": false, "empty": ""}));
        assert_eq!(*resolve(&context, "a.b.c"), *resolve(&context, "a"));
        assert_eq!(*resolve(&context, "zero.b"), Value::Number(0.0));
        assert_eq!(*resolve(&context, "off.b.c"), Value::Bool(false));
        assert_eq!(*resolve(&context, "empty.length"), Value::from(""));
    }

    #[test]
    fn test_empty_path_and_scalar_context() {
        let context = ctx(json!({"a": 1}));
        assert_eq!(*resolve(&context, ""), Value::Null);
        assert_eq!(*resolve(&Value::from("text"), "length"), Value::Null);
        assert_eq!(*resolve(&Value::Number(3.0), "a"), Value::Null);
    }

    #[test]
    fn test_sequence_and_string_properties() {
        let context = ctx(json!({"tags": ["rust", "web"], "name": "tofu"}));
        assert_eq!(*resolve(&context, "tags.length"), Value::Number(2.0));
        assert_eq!(*resolve(&context, "tags.1"), Value::from("web"));
        assert_eq!(*resolve(&context, "tags.01"), Value::Null);
        assert_eq!(*resolve(&context, "tags.5"), Value::Null);
        assert_eq!(*resolve(&context, "name.length"), Value::Number(4.0));
        assert_eq!(*resolve(&context, "name.0"), Value::from("t"));
        assert_eq!(*resolve(&context, "tags.0.length"), Value::Number(4.0));
    }

    #[test]
    fn test_walk_from_scalar_start() {
        let item = Value::from("abc");
        assert_eq!(*walk(&item, ["length"]), Value::Number(3.0));
        assert_eq!(*walk(&item, ["title"]), Value::Null);

        let zero = Value::Number(0.0);
        assert_eq!(*walk(&zero, ["title"]), Value::Number(0.0));
    }
}
