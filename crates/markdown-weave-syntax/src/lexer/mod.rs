//! # Tokenizer
//!
//! First pipeline stage: turns source text into a flat, ordered list of
//! [`Token`]s. There is no tree structure here; the only mode the tokenizer
//! carries between lines is whether it is inside a fenced code block.
//!
//! ## Matching order
//!
//! At the start of a line the line matchers in [`block`] are tried first.
//! If none applies (or we are mid-line) the inline matchers in [`inline`] get
//! a turn. If nothing matches, one character is consumed as plain text, so
//! every step makes progress.
//!
//! ## Lossless
//!
//! Every byte of the input lands in exactly one token:
//!
//! ```
//! use markdown_weave_syntax::lexer::tokenize;
//!
//! let input = "# Hi\n\nSome *text*\n";
//! let tokens = tokenize(input);
//! let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(rebuilt, input);
//! ```

pub mod block;
mod cursor;
pub mod inline;

use crate::token::{Position, Token, TokenKind, TokenMeta};
use block::CodeFence;
use cursor::SourceCursor;

/// Tokenize `input`. Never fails; the last token is always
/// [`TokenKind::EndOfInput`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    while lexer.cursor.offset() < input.len() {
        lexer.step();
    }
    lexer.finish()
}

struct Lexer<'a> {
    input: &'a str,
    cursor: SourceCursor,
    /// The fence we are inside of, if any.
    fence: Option<CodeFence>,
    /// Start of the plain-text run being accumulated.
    pending_text: Option<Position>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: SourceCursor::new(),
            fence: None,
            pending_text: None,
            tokens: Vec::new(),
        }
    }

    /// Returns `(content_end, line_end)` for the line containing the cursor:
    /// the content stops before `\r\n`/`\n`, the line includes it.
    fn line_bounds(&self) -> (usize, usize) {
        let offset = self.cursor.offset();
        match self.input[offset..].find('\n') {
            Some(nl) => {
                let newline = offset + nl;
                let content_end = if self.input[..newline].ends_with('\r') && newline > offset {
                    newline - 1
                } else {
                    newline
                };
                (content_end, newline + 1)
            }
            None => (self.input.len(), self.input.len()),
        }
    }

    fn step(&mut self) {
        let offset = self.cursor.offset();
        let (content_end, line_end) = self.line_bounds();
        let line = &self.input[offset..content_end];

        if self.cursor.at_line_start() {
            if let Some(fence) = self.fence {
                if fence.closes(line) {
                    self.fence = None;
                    self.emit(TokenKind::CodeFenceEnd, line_end, TokenMeta::None);
                } else {
                    self.emit(TokenKind::Text, line_end, TokenMeta::None);
                }
                return;
            }

            if let Some((kind, meta)) = block::match_line(line) {
                if kind == TokenKind::CodeFenceStart {
                    self.fence = CodeFence::open(line).map(|(fence, _)| fence);
                }
                self.emit(kind, line_end, meta);
                return;
            }
        }

        if let Some((len, kind, meta)) = inline::match_inline(line) {
            self.emit(kind, offset + len, meta);
            return;
        }

        self.bump_text();
    }

    /// Consumes one character into the pending text run. A newline ends the run.
    fn bump_text(&mut self) {
        let offset = self.cursor.offset();
        let Some(c) = self.input[offset..].chars().next() else {
            return;
        };
        if self.pending_text.is_none() {
            self.pending_text = Some(self.cursor.position());
        }
        self.cursor.advance_to(self.input, offset + c.len_utf8());
        if c == '\n' {
            self.flush_text();
        }
    }

    fn flush_text(&mut self) {
        if let Some(start) = self.pending_text.take() {
            let end = self.cursor.offset();
            self.tokens.push(Token {
                kind: TokenKind::Text,
                text: self.input[start.offset..end].to_string(),
                start,
                end,
                meta: TokenMeta::None,
            });
        }
    }

    fn emit(&mut self, kind: TokenKind, end: usize, meta: TokenMeta) {
        self.flush_text();
        let start = self.cursor.position();
        debug_assert!(end > start.offset, "tokenizer must make progress");
        self.tokens.push(Token {
            kind,
            text: self.input[start.offset..end].to_string(),
            start,
            end,
            meta,
        });
        self.cursor.advance_to(self.input, end);
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_text();
        if self.fence.is_some() {
            log::debug!("unterminated code fence runs to end of input");
        }
        let start = self.cursor.position();
        self.tokens.push(Token {
            kind: TokenKind::EndOfInput,
            text: String::new(),
            start,
            end: start.offset,
            meta: TokenMeta::None,
        });
        log::trace!("tokenized {} bytes into {} tokens", self.input.len(), self.tokens.len());
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input_is_just_end_of_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].start, Position::START);
    }

    #[test]
    fn heading_then_paragraph() {
        assert_eq!(
            kinds("# Title\n\nHello **world**\n"),
            vec![
                TokenKind::Heading,
                TokenKind::BlankLine,
                TokenKind::Text,
                TokenKind::Bold,
                TokenKind::Text,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn plain_text_is_coalesced_per_line() {
        let tokens = tokenize("one two\nthree");
        assert_eq!(tokens[0].text, "one two\n");
        assert_eq!(tokens[1].text, "three");
        assert_eq!(
            tokens[1].start,
            Position {
                line: 2,
                column: 1,
                offset: 8
            }
        );
    }

    #[test]
    fn star_is_list_at_line_start_and_italic_mid_line() {
        assert_eq!(
            kinds("* item *em*"),
            vec![TokenKind::ListItem, TokenKind::EndOfInput]
        );
        assert_eq!(
            kinds("x *em*"),
            vec![TokenKind::Text, TokenKind::Italic, TokenKind::EndOfInput]
        );
    }

    #[test]
    fn fenced_lines_are_verbatim() {
        let input = "```js\n# not a heading\n- nor a list\n```\nafter\n";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::CodeFenceStart,
                TokenKind::Text,
                TokenKind::Text,
                TokenKind::CodeFenceEnd,
                TokenKind::Text,
                TokenKind::EndOfInput,
            ]
        );
        let tokens = tokenize(input);
        assert_eq!(tokens[1].text, "# not a heading\n");
        assert_eq!(
            tokens[0].meta,
            TokenMeta::Fence {
                language: Some("js".into())
            }
        );
    }

    #[test]
    fn shorter_fence_does_not_close() {
        assert_eq!(
            kinds("````\n```\n````\n"),
            vec![
                TokenKind::CodeFenceStart,
                TokenKind::Text,
                TokenKind::CodeFenceEnd,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let tokens = tokenize("# A\r\n\r\nb\r\n");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Heading,
                TokenKind::BlankLine,
                TokenKind::Text,
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(
            tokens[0].meta,
            TokenMeta::Heading {
                level: 1,
                content: "A".into()
            }
        );
    }

    #[test]
    fn offsets_strictly_increase_and_cover_input() {
        let input = "## Head\n- [x] task\n  - sub\n| a | b |\n|---|---|\n::Card{x: 1}\n#body\ntext `c` ![i](u) [l](u) <Icon />\n::\n> quote\n---\n";
        let tokens = tokenize(input);
        let mut last_end = 0;
        for token in &tokens {
            assert_eq!(token.start.offset, last_end);
            assert_eq!(&input[token.start.offset..token.end], token.text);
            last_end = token.end;
        }
        assert_eq!(last_end, input.len());
    }

    #[test]
    fn multibyte_text_falls_back_by_character() {
        let input = "héllo → wörld";
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].text, input);
    }
}
