//! Builds the template AST in a single pass over the token stream.
//!
//! Loops nest. Conditionals do not: a `{{#if}}` is closed by the first
//! `{{/if}}` after it, and an `{{#if}}` marker met inside its body is kept
//! as literal text for the next render pass to pick up. The one exception
//! is an `{{#if item.…}}` inside a loop body, which forms its own block
//! even within an outer conditional, since item conditionals are settled
//! while the loop expands.
//!
//! A closing marker with nothing to close stays literal text. So does a
//! block still open when its enclosing loop closes or the input ends.
//! Partial markers are expected to be expanded already; leftovers are kept
//! as text.

use super::lexer::{Fallback, Marker, Token, tokenize};

/// Paths starting with this refer to the current loop element.
pub const ITEM_PREFIX: &str = "item.";

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Text(&'a str),
    Var {
        path: &'a str,
        fallback: Option<Fallback<'a>>,
    },
    If {
        path: &'a str,
        body: Vec<Node<'a>>,
    },
    Each {
        path: &'a str,
        body: Vec<Node<'a>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    /// `{{#if path}}`, tested against the page context
    If,
    /// `{{#if item.path}}` inside a loop body
    ItemIf,
    Each,
}

impl BlockKind {
    fn name(self) -> &'static str {
        match self {
            BlockKind::If | BlockKind::ItemIf => "#if",
            BlockKind::Each => "#each",
        }
    }

    fn is_conditional(self) -> bool {
        matches!(self, BlockKind::If | BlockKind::ItemIf)
    }
}

/// A block whose closing marker has not been seen yet.
struct Frame<'a> {
    kind: BlockKind,
    path: &'a str,
    /// The opening marker as written, restored if the block never closes.
    open: &'a str,
    body: Vec<Node<'a>>,
}

struct Parser<'a> {
    root: Vec<Node<'a>>,
    frames: Vec<Frame<'a>>,
}

/// Parse template text into nodes.
pub fn parse(src: &str) -> Vec<Node<'_>> {
    let mut parser = Parser {
        root: Vec::new(),
        frames: Vec::new(),
    };

    for token in tokenize(src) {
        match token {
            Token::Text(text) => parser.push(Node::Text(text)),
            Token::Marker { marker, raw } => match marker {
                Marker::Var { path, fallback } => parser.push(Node::Var { path, fallback }),
                Marker::EachOpen(path) => parser.open(BlockKind::Each, path, raw),
                Marker::IfOpen(path) => parser.open_if(path, raw),
                Marker::EachClose => parser.close_each(raw),
                Marker::IfClose => parser.close_if(raw),
                Marker::Partial(_) => parser.push(Node::Text(raw)),
            },
        }
    }

    while !parser.frames.is_empty() {
        parser.abandon_innermost();
    }
    parser.root
}

impl<'a> Parser<'a> {
    fn push(&mut self, node: Node<'a>) {
        match self.frames.last_mut() {
            Some(frame) => frame.body.push(node),
            None => self.root.push(node),
        }
    }

    fn open(&mut self, kind: BlockKind, path: &'a str, open: &'a str) {
        self.frames.push(Frame {
            kind,
            path,
            open,
            body: Vec::new(),
        });
    }

    /// Frames opened since the innermost loop, or all of them outside loops.
    fn conditionals(&self) -> &[Frame<'a>] {
        let start = self
            .frames
            .iter()
            .rposition(|f| f.kind == BlockKind::Each)
            .map_or(0, |i| i + 1);
        &self.frames[start..]
    }

    fn open_if(&mut self, path: &'a str, raw: &'a str) {
        let in_loop = self.frames.iter().any(|f| f.kind == BlockKind::Each);
        let kind = if in_loop && path.starts_with(ITEM_PREFIX) {
            BlockKind::ItemIf
        } else {
            BlockKind::If
        };

        let swallowed = self
            .conditionals()
            .iter()
            .any(|f| f.kind == BlockKind::ItemIf || (kind == BlockKind::If && f.kind == BlockKind::If));
        if swallowed {
            self.push(Node::Text(raw));
        } else {
            self.open(kind, path, raw);
        }
    }

    fn close_if(&mut self, raw: &'a str) {
        if !self.frames.last().is_some_and(|f| f.kind.is_conditional()) {
            tracing::debug!("stray closing marker {raw:?} left as text");
            self.push(Node::Text(raw));
            return;
        }
        if let Some(frame) = self.frames.pop() {
            self.push(Node::If {
                path: frame.path,
                body: frame.body,
            });
        }
    }

    fn close_each(&mut self, raw: &'a str) {
        let Some(index) = self.frames.iter().rposition(|f| f.kind == BlockKind::Each) else {
            tracing::debug!("stray closing marker {raw:?} left as text");
            self.push(Node::Text(raw));
            return;
        };

        while self.frames.len() > index + 1 {
            self.abandon_innermost();
        }

        if let Some(frame) = self.frames.pop() {
            self.push(Node::Each {
                path: frame.path,
                body: frame.body,
            });
        }
    }

    /// Turn the innermost open block back into literal text.
    fn abandon_innermost(&mut self) {
        if let Some(frame) = self.frames.pop() {
            tracing::debug!(
                "unterminated {} block {:?} left as text",
                frame.kind.name(),
                frame.open
            );
            self.push(Node::Text(frame.open));
            for node in frame.body {
                self.push(node);
            }
        }
    }
}
