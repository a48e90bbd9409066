//! # Inline Parsing
//!
//! Turns the raw text of a paragraph, heading, list item or table cell into
//! [`Inline`](crate::ast::Inline) nodes.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants for each inline construct
//! - **`cursor`**: [`Cursor`](cursor::Cursor) over the text being parsed
//! - **`parser`**: [`parse_inline`] and its `try_parse_*` rules
//!
//! ## Precedence
//!
//! Rules are tried at each position in a fixed order: code span, escape, hard
//! break, strong, emphasis, strikethrough, image, link, inline component.
//! Code spans come first, so nothing inside backticks is interpreted.
//! Emphasis bodies are parsed recursively, which gives nested emphasis.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
