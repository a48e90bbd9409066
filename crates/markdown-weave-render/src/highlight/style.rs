//! CSS-like highlighting.
//!
//! Outside braces identifiers are selectors; inside, an identifier followed
//! by `:` is a property and anything else is a value.

use logos::{Lexer, Logos};

use super::{SpanBuf, SpanKind, through_close};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"\s+")]
    Whitespace,

    #[token("/*", block_comment)]
    BlockComment,

    /// scss/less only, but harmless elsewhere.
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r#""([^"\\\n]|\\.)*"?"#)]
    #[regex(r"'([^'\\\n]|\\.)*'?")]
    Str,

    #[regex(r"[0-9]+(\.[0-9]+)?([A-Za-z]+|%)?")]
    #[regex(r"\.[0-9]+([A-Za-z]+|%)?")]
    Number,

    #[regex(r"#[A-Za-z0-9_-]+")]
    Hash,

    #[regex(r"@[A-Za-z-]+")]
    AtRule,

    #[regex(r"![A-Za-z]+")]
    Important,

    #[regex(r"-?[A-Za-z_][A-Za-z0-9_-]*")]
    Ident,

    #[regex(r"--[A-Za-z0-9_-]+")]
    CustomProperty,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_-]*")]
    Variable,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[regex(r"[:;,.()\[\]&]")]
    Punctuation,

    #[regex(r"[>+~*=/^|]")]
    Operator,
}

fn block_comment(lex: &mut Lexer<Token>) -> bool {
    lex.bump(through_close(lex.remainder(), "*/"));
    true
}

pub(super) fn highlight(code: &str, buf: &mut SpanBuf) {
    let mut lexer = Token::lexer(code);
    let mut depth = 0usize;
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let in_block = depth > 0;
        let kind = match result {
            Ok(Token::Whitespace) | Err(()) => None,
            Ok(Token::BlockComment | Token::LineComment) => Some(SpanKind::Comment),
            Ok(Token::Str) => Some(SpanKind::String),
            Ok(Token::Number) => Some(SpanKind::Number),
            Ok(Token::Hash) if in_block => Some(SpanKind::Number),
            Ok(Token::Hash) => Some(SpanKind::Selector),
            Ok(Token::AtRule | Token::Important) => Some(SpanKind::Keyword),
            Ok(Token::Ident) if !in_block => Some(SpanKind::Selector),
            Ok(Token::Ident) => Some(value_kind(lexer.remainder())),
            Ok(Token::CustomProperty) if lexer.remainder().trim_start().starts_with(':') => {
                Some(SpanKind::Property)
            }
            Ok(Token::CustomProperty | Token::Variable) => Some(SpanKind::Variable),
            Ok(Token::OpenBrace) => {
                depth += 1;
                Some(SpanKind::Punctuation)
            }
            Ok(Token::CloseBrace) => {
                depth = depth.saturating_sub(1);
                Some(SpanKind::Punctuation)
            }
            Ok(Token::Punctuation) => Some(SpanKind::Punctuation),
            Ok(Token::Operator) => Some(SpanKind::Operator),
        };
        match kind {
            Some(kind) => buf.span(kind, text),
            None => buf.raw(text),
        }
    }
}

/// Identifier inside a rule block.
fn value_kind(rest: &str) -> SpanKind {
    let rest = rest.trim_start();
    if rest.starts_with('(') {
        SpanKind::Function
    } else if rest.starts_with(':') {
        SpanKind::Property
    } else {
        SpanKind::Variable
    }
}
