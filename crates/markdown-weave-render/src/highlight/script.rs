//! JavaScript/TypeScript-like highlighting.

use logos::{Lexer, Logos};

use super::{SpanBuf, SpanKind, is_pascal_case, through_close};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "declare", "default", "delete", "do", "else", "enum", "export", "extends",
    "false", "finally", "for", "from", "function", "get", "if", "implements", "import", "in",
    "instanceof", "interface", "keyof", "let", "namespace", "new", "null", "of", "private",
    "protected", "public", "readonly", "return", "set", "static", "super", "switch", "this",
    "throw", "true", "try", "type", "typeof", "undefined", "var", "void", "while", "with",
    "yield",
];

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"\s+")]
    Whitespace,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r#""([^"\\\n]|\\.)*"?"#)]
    #[regex(r"'([^'\\\n]|\\.)*'?")]
    #[regex(r"`([^`\\]|\\(.|\n))*`?")]
    Str,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"0[xXoObB][0-9a-fA-F_]+n?")]
    #[regex(r"\.[0-9][0-9_]*")]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[token("/")]
    Slash,

    #[regex(r"[-+*%=<>!&|^~?:]+")]
    Operator,

    #[regex(r"[(){}\[\];,.@#]")]
    Punctuation,
}

fn block_comment(lex: &mut Lexer<Token>) -> bool {
    lex.bump(through_close(lex.remainder(), "*/"));
    true
}

fn ident_kind(ident: &str, rest: &str) -> SpanKind {
    if KEYWORDS.contains(&ident) {
        SpanKind::Keyword
    } else if is_pascal_case(ident) {
        SpanKind::Class
    } else if rest.starts_with('(') {
        SpanKind::Function
    } else {
        SpanKind::Variable
    }
}

pub(super) fn highlight(code: &str, buf: &mut SpanBuf) {
    let mut lexer = Token::lexer(code);
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(Token::Whitespace) | Err(()) => None,
            Ok(Token::BlockComment | Token::LineComment) => Some(SpanKind::Comment),
            Ok(Token::Str) => Some(SpanKind::String),
            Ok(Token::Number) => Some(SpanKind::Number),
            Ok(Token::Ident) => Some(ident_kind(text, lexer.remainder())),
            Ok(Token::Slash | Token::Operator) => Some(SpanKind::Operator),
            Ok(Token::Punctuation) => Some(SpanKind::Punctuation),
        };
        match kind {
            Some(kind) => buf.span(kind, text),
            None => buf.raw(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Highlighted, highlight as run};
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(code: &str) -> Vec<(SpanKind, String)> {
        run(code, Some("ts"))
            .into_iter()
            .filter_map(|h| match h {
                Highlighted::Span { kind, text } => Some((kind, text)),
                Highlighted::Raw(_) => None,
            })
            .collect()
    }

    fn span(kind: SpanKind, text: &str) -> (SpanKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn identifiers_are_classified() {
        assert_eq!(
            spans("const map = new Map(); render(x)"),
            vec![
                span(SpanKind::Keyword, "const"),
                span(SpanKind::Variable, "map"),
                span(SpanKind::Operator, "="),
                span(SpanKind::Keyword, "new"),
                span(SpanKind::Class, "Map"),
                span(SpanKind::Punctuation, "("),
                span(SpanKind::Punctuation, ")"),
                span(SpanKind::Punctuation, ";"),
                span(SpanKind::Function, "render"),
                span(SpanKind::Punctuation, "("),
                span(SpanKind::Variable, "x"),
                span(SpanKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn comments_and_division() {
        assert_eq!(
            spans("a / b // half\n/* multi\nline */"),
            vec![
                span(SpanKind::Variable, "a"),
                span(SpanKind::Operator, "/"),
                span(SpanKind::Variable, "b"),
                span(SpanKind::Comment, "// half"),
                span(SpanKind::Comment, "/* multi\nline */"),
            ]
        );
    }

    #[test]
    fn strings_track_escapes() {
        assert_eq!(
            spans(r#""a\"b" 'c' `t ${x}`"#),
            vec![
                span(SpanKind::String, r#""a\"b""#),
                span(SpanKind::String, "'c'"),
                span(SpanKind::String, "`t ${x}`"),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            spans("1_000 3.14 0xff 2e10 10n"),
            vec![
                span(SpanKind::Number, "1_000"),
                span(SpanKind::Number, "3.14"),
                span(SpanKind::Number, "0xff"),
                span(SpanKind::Number, "2e10"),
                span(SpanKind::Number, "10n"),
            ]
        );
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        assert_eq!(
            spans("x /* open"),
            vec![
                span(SpanKind::Variable, "x"),
                span(SpanKind::Comment, "/* open"),
            ]
        );
    }
}
