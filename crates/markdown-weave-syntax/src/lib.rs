//! # markdown-weave-syntax
//!
//! Front half of the markdown-weave pipeline: source text → tokens → AST.
//!
//! ```text
//! &str ──tokenize──▶ Vec<Token> ──parse──▶ Document
//! ```
//!
//! - [`lexer::tokenize`] scans the input into a flat, lossless token list
//! - [`parser::parse`] builds the block/inline [`ast`] from those tokens
//! - [`inline::parse_inline`] handles text-level markup inside blocks
//! - [`props::parse_props`] reads component props
//!
//! Both stages are total: malformed input degrades to plain text or is
//! dropped, never an error.
//!
//! ```
//! use markdown_weave_syntax::{parse_markdown, ast::{Block, Inline, EmphasisStyle}};
//!
//! let doc = parse_markdown("Hello **world**");
//! let Block::Paragraph { children } = &doc.children[0] else { unreachable!() };
//! assert_eq!(children[0], Inline::Text("Hello ".into()));
//! assert!(matches!(children[1], Inline::Emphasis { style: EmphasisStyle::Bold, .. }));
//! ```

pub mod ast;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod props;
mod scan;
pub mod token;

pub use ast::{Block, Document, Inline};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Position, Token, TokenKind};

/// Tokenize and parse in one step.
pub fn parse_markdown(source: &str) -> Document {
    parse(&tokenize(source))
}
