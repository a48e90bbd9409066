//! # Parser
//!
//! Second pipeline stage: a recursive-descent parser over the token list that
//! builds the [`Document`] AST.
//!
//! Grammar rules live in submodules and all take a `&mut Parser`. A rule
//! either returns `None` with the cursor where it found it, or consumes at
//! least one token and returns a node. [`Parser::checkpoint`] and
//! [`Parser::rewind`] give rules cheap backtracking.
//!
//! The parser is total: a token no rule claims is dropped (and logged) and
//! parsing continues with the next one.
//!
//! ```
//! use markdown_weave_syntax::{lexer::tokenize, parser::parse, ast::Block};
//!
//! let doc = parse(&tokenize("# Hi\n\nthere\n"));
//! assert!(matches!(doc.children[0], Block::Heading { level: 1, .. }));
//! assert!(matches!(doc.children[1], Block::Paragraph { .. }));
//! ```

mod block;
mod component;
mod list;
mod table;

use crate::ast::Document;
use crate::token::{Token, TokenKind};

/// Cursor over a token slice plus the little context grammar rules need.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// How many component blocks enclose the current position.
    component_depth: usize,
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            component_depth: 0,
        }
    }

    /// Parse every block until the end of input.
    pub fn parse(mut self) -> Document {
        let mut children = Vec::new();
        while !self.at_end() {
            if self.eat(TokenKind::BlankLine) {
                continue;
            }
            match block::block(&mut self) {
                Some(node) => children.push(node),
                None => self.skip_unmatched(),
            }
        }
        log::trace!("parsed {} top-level blocks", children.len());
        Document { children }
    }

    /// Current token kind, or `EndOfInput` past the end.
    pub fn current(&self) -> TokenKind {
        self.nth(0)
    }

    /// Look ahead `n` tokens.
    pub fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EndOfInput)
    }

    /// The current token itself.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub fn at_end(&self) -> bool {
        self.current() == TokenKind::EndOfInput
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume and return the current token. Never moves past `EndOfInput`.
    pub fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != TokenKind::EndOfInput {
            self.pos += 1;
        }
        Some(token)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    pub fn enter_component(&mut self) {
        self.component_depth += 1;
    }

    pub fn leave_component(&mut self) {
        self.component_depth = self.component_depth.saturating_sub(1);
    }

    pub fn in_component(&self) -> bool {
        self.component_depth > 0
    }

    /// Drop the current token so parsing can move on.
    pub fn skip_unmatched(&mut self) {
        if let Some(token) = self.bump() {
            log::debug!(
                "dropping unmatched {:?} token at {}:{}",
                token.kind,
                token.start.line,
                token.start.column
            );
        }
    }
}

/// Parse a token list into a [`Document`].
pub fn parse(tokens: &[Token]) -> Document {
    Parser::new(tokens).parse()
}
