//! Splits template text into literal text and `{{ … }}` markers.
//!
//! Recognised markers (whitespace inside the braces is insignificant):
//!
//! - `{{ > name }}` partial inclusion, names are `[A-Za-z0-9_-]+`
//! - `{{ #each path }}` / `{{ /each }}`
//! - `{{ #if path }}` / `{{ /if }}`
//! - `{{ path || "literal" }}` and `{{ path || other.path }}`
//! - `{{ path }}`
//!
//! Paths are `[A-Za-z0-9_.]+`. A `{{` that does not start one of these
//! forms is ordinary text, and scanning resumes one character later so a
//! marker may begin inside it (`{{{name}}}` renders `{` + name + `}`).

/// The right-hand side of `{{ path || fallback }}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback<'a> {
    /// A double-quoted literal, quotes removed.
    Literal(&'a str),
    /// Another path to resolve.
    Path(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    Var {
        path: &'a str,
        fallback: Option<Fallback<'a>>,
    },
    Partial(&'a str),
    EachOpen(&'a str),
    EachClose,
    IfOpen(&'a str),
    IfClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Marker {
        marker: Marker<'a>,
        /// The marker exactly as written in the source.
        raw: &'a str,
    },
}

impl<'a> Token<'a> {
    /// The source text this token was read from.
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Text(text) => text,
            Token::Marker { raw, .. } => raw,
        }
    }
}

/// Tokenize `src`. Concatenating the raw text of the tokens gives `src` back.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut search_from = 0;

    while let Some(offset) = src[search_from..].find("{{") {
        let start = search_from + offset;
        match parse_marker(&src[start..]) {
            Some((marker, len)) => {
                if start > text_start {
                    tokens.push(Token::Text(&src[text_start..start]));
                }
                tokens.push(Token::Marker {
                    marker,
                    raw: &src[start..start + len],
                });
                text_start = start + len;
                search_from = text_start;
            }
            // "{{" is ASCII, so start + 1 is a char boundary
            None => search_from = start + 1,
        }
    }

    if text_start < src.len() {
        tokens.push(Token::Text(&src[text_start..]));
    }
    tokens
}

/// Try to read one marker at the start of `s` (which begins with `{{`).
/// Returns the marker and its length in bytes.
fn parse_marker(s: &str) -> Option<(Marker<'_>, usize)> {
    let mut cur = Cursor { s, pos: 0 };
    cur.eat("{{").then_some(())?;
    cur.skip_ws();

    let marker = if cur.eat(">") {
        cur.skip_ws();
        let name = cur.take_while(is_partial_char)?;
        Marker::Partial(name)
    } else if cur.eat("#each") {
        Marker::EachOpen(cur.block_path()?)
    } else if cur.eat("#if") {
        Marker::IfOpen(cur.block_path()?)
    } else if cur.eat("/each") {
        Marker::EachClose
    } else if cur.eat("/if") {
        Marker::IfClose
    } else {
        let path = cur.take_while(is_path_char)?;
        cur.skip_ws();
        let fallback = if cur.eat("||") {
            cur.skip_ws();
            Some(cur.fallback()?)
        } else {
            None
        };
        Marker::Var { path, fallback }
    };

    cur.skip_ws();
    cur.eat("}}").then_some((marker, cur.pos))
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_partial_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

struct Cursor<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.s[self.pos..]
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Skip whitespace, returning how many bytes were skipped.
    fn skip_ws(&mut self) -> usize {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
        skipped
    }

    /// Take a non-empty run of characters matching `pred`.
    fn take_while(&mut self, pred: fn(char) -> bool) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// `\s+path` after a block keyword.
    fn block_path(&mut self) -> Option<&'a str> {
        if self.skip_ws() == 0 {
            return None;
        }
        self.take_while(is_path_char)
    }

    fn fallback(&mut self) -> Option<Fallback<'a>> {
        if self.eat("\"") {
            let rest = self.rest();
            let end = rest.find('"')?;
            self.pos += end + 1;
            Some(Fallback::Literal(&rest[..end]))
        } else {
            self.take_while(is_path_char).map(Fallback::Path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(src: &str) -> Vec<Marker<'_>> {
        tokenize(src)
            .into_iter()
            .filter_map(|t| match t {
                Token::Marker { marker, .. } => Some(marker),
                Token::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_all_marker_forms() {
        let src = r#"{{> header}}{{#each articles}}{{/each}}{{ #if a.b }}{{ /if }}{{x || "y"}}{{x||z.w}}{{ plain }}"#;
        assert_eq!(
            markers(src),
            vec![
                Marker::Partial("header"),
                Marker::EachOpen("articles"),
                Marker::EachClose,
                Marker::IfOpen("a.b"),
                Marker::IfClose,
                Marker::Var {
                    path: "x",
                    fallback: Some(Fallback::Literal("y"))
                },
                Marker::Var {
                    path: "x",
                    fallback: Some(Fallback::Path("z.w"))
                },
                Marker::Var {
                    path: "plain",
                    fallback: None
                },
            ]
        );
    }

    #[test]
    fn test_round_trips_source() {
        let src = "<h1>{{ title }}</h1>\n{{ not a marker }} {{#each}} {{> }} tail";
        let rebuilt: String = tokenize(src).iter().map(Token::raw).collect();
        assert_eq!(rebuilt, src);
    }

    #[test]
    fn test_invalid_markers_are_text() {
        assert!(markers("{{ foo bar }}").is_empty());
        assert!(markers("{{#eachitems}}").is_empty());
        assert!(markers("{{ #if }}").is_empty());
        assert!(markers("{{ a || }}").is_empty());
        assert!(markers("{{ a || \"open }}").is_empty());
        assert!(markers("{{ title }").is_empty());
    }

    #[test]
    fn test_marker_inside_extra_braces() {
        let tokens = tokenize("{{{name}}}");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::Text("{"));
        assert_eq!(tokens[1].raw(), "{{name}}");
        assert_eq!(tokens[2], Token::Text("}"));
    }

    #[test]
    fn test_literal_may_contain_braces_and_newlines() {
        assert_eq!(
            markers("{{ a || \"x}}\ny\" }}"),
            vec![Marker::Var {
                path: "a",
                fallback: Some(Fallback::Literal("x}}\ny"))
            }]
        );
    }

    #[test]
    fn test_partial_names_allow_dashes() {
        assert_eq!(markers("{{ >  site-nav_2 }}"), vec![Marker::Partial("site-nav_2")]);
        assert!(markers("{{> site.nav }}").is_empty());
    }
}
