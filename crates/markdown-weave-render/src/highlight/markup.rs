//! HTML/XML-like highlighting.
//!
//! A single `in_tag` flag separates tag internals (names, attributes, quoted
//! values) from text content, which passes through raw.

use logos::{Lexer, Logos};

use super::{SpanBuf, SpanKind, through_close};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"\s+")]
    Whitespace,

    #[token("<!--", comment)]
    Comment,

    #[regex(r"<![A-Za-z][^>]*>?")]
    Doctype,

    #[regex(r"</?[A-Za-z][A-Za-z0-9:._-]*")]
    TagOpen,

    #[token(">")]
    #[token("/>")]
    TagEnd,

    #[regex(r"[A-Za-z_:@][A-Za-z0-9_:.@-]*")]
    Name,

    #[token("=")]
    Equals,

    #[regex(r#""[^"<\n]*"?"#)]
    #[regex(r"'[^'<\n]*'?")]
    Str,

    #[regex(r"&[A-Za-z][A-Za-z0-9]*;")]
    #[regex(r"&#[0-9]+;")]
    #[regex(r"&#[xX][0-9a-fA-F]+;")]
    Entity,
}

fn comment(lex: &mut Lexer<Token>) -> bool {
    lex.bump(through_close(lex.remainder(), "-->"));
    true
}

pub(super) fn highlight(code: &str, buf: &mut SpanBuf) {
    let mut lexer = Token::lexer(code);
    let mut in_tag = false;
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(Token::Whitespace) | Err(()) => None,
            Ok(Token::Comment) => Some(SpanKind::Comment),
            Ok(Token::Doctype) => Some(SpanKind::Keyword),
            Ok(Token::TagOpen) => {
                in_tag = true;
                Some(SpanKind::Tag)
            }
            Ok(Token::TagEnd) if in_tag => {
                in_tag = false;
                Some(SpanKind::Tag)
            }
            Ok(Token::Name) if in_tag => Some(SpanKind::Attribute),
            Ok(Token::Equals) if in_tag => Some(SpanKind::Operator),
            Ok(Token::Str) if in_tag => Some(SpanKind::String),
            Ok(Token::Entity) => Some(SpanKind::Entity),
            Ok(Token::TagEnd | Token::Name | Token::Equals | Token::Str) => None,
        };
        match kind {
            Some(kind) => buf.span(kind, text),
            None => buf.raw(text),
        }
    }
}
