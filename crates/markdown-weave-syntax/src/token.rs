//! Token types produced by the tokenizer.
//!
//! A token's `text` is always the exact source slice it covers, so the
//! concatenation of all token texts reproduces the input. Anything the
//! tokenizer interpreted (heading level, list depth, table cells...) lives in
//! [`TokenMeta`].

use crate::ast::Alignment;

/// Source position of a token's first character.
///
/// `line` and `column` are 1-based, `column` counts characters.
/// `offset` is a byte offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// Kinds of tokens.
///
/// The first group is only recognised at the start of a line, the second
/// group anywhere inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Line-level ===
    Heading,
    CodeFenceStart,
    CodeFenceEnd,
    BlockquoteLine,
    ListItem,
    HorizontalRule,
    ComponentStart,
    ComponentEnd,
    SlotMarker,
    TableRow,
    TableSeparator,
    BlankLine,

    // === Inline ===
    InlineCode,
    Bold,
    Italic,
    Strikethrough,
    Link,
    Image,
    InlineComponent,
    Text,

    /// Zero-length terminator, always the last token.
    EndOfInput,
}

impl TokenKind {
    /// Whether this kind is produced by an inline matcher (or the text fallback).
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            TokenKind::InlineCode
                | TokenKind::Bold
                | TokenKind::Italic
                | TokenKind::Strikethrough
                | TokenKind::Link
                | TokenKind::Image
                | TokenKind::InlineComponent
                | TokenKind::Text
        )
    }
}

/// Kind-specific data attached to a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenMeta {
    #[default]
    None,
    Heading {
        level: u8,
        content: String,
    },
    Fence {
        language: Option<String>,
    },
    Blockquote {
        content: String,
    },
    ListItem {
        ordered: bool,
        /// The number written before `.` for ordered items.
        number: Option<u64>,
        depth: usize,
        checked: Option<bool>,
        content: String,
    },
    TableRow {
        cells: Vec<String>,
    },
    TableSeparator {
        alignments: Vec<Alignment>,
    },
    Component {
        name: String,
        props: String,
        self_closing: bool,
    },
    Slot {
        name: String,
    },
    /// Inner text of code spans and emphasis runs.
    Delimited {
        inner: String,
    },
    Link {
        text: String,
        url: String,
    },
    Image {
        alt: String,
        url: String,
    },
    InlineComponent {
        name: String,
        props: String,
    },
}

/// A lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, `input[start.offset..end]`.
    pub text: String,
    pub start: Position,
    /// Exclusive end byte offset.
    pub end: usize,
    pub meta: TokenMeta,
}

impl Token {
    pub fn len(&self) -> usize {
        self.end - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
