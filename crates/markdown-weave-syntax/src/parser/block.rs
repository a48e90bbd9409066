//! Block-level grammar rules.

use super::{Parser, component, list, table};
use crate::ast::Block;
use crate::inline::parse_inline;
use crate::token::{TokenKind, TokenMeta};

type BlockRule = fn(&mut Parser<'_>) -> Option<Block>;

/// Tried in order; paragraph is the fallback.
const BLOCK_RULES: [BlockRule; 8] = [
    heading,
    code_block,
    horizontal_rule,
    blockquote,
    list::list_block,
    table::table,
    component::component,
    paragraph,
];

/// Parse one block at the cursor, or `None` if no rule claims the token.
pub(super) fn block(p: &mut Parser<'_>) -> Option<Block> {
    BLOCK_RULES.iter().find_map(|rule| rule(p))
}

fn heading(p: &mut Parser<'_>) -> Option<Block> {
    let token = p.peek()?;
    let TokenMeta::Heading { level, content } = &token.meta else {
        return None;
    };
    p.bump();
    Some(Block::Heading {
        level: *level,
        children: parse_inline(content),
    })
}

fn code_block(p: &mut Parser<'_>) -> Option<Block> {
    let token = p.peek()?;
    let TokenMeta::Fence { language } = &token.meta else {
        return None;
    };
    p.bump();

    let mut code = String::new();
    loop {
        match p.current() {
            TokenKind::CodeFenceEnd => {
                p.bump();
                break;
            }
            TokenKind::EndOfInput => {
                log::debug!("code block at line {} is never closed", token.start.line);
                break;
            }
            _ => {
                if let Some(line) = p.bump() {
                    code.push_str(&line.text);
                }
            }
        }
    }
    if code.ends_with('\n') {
        code.pop();
        if code.ends_with('\r') {
            code.pop();
        }
    }

    Some(Block::CodeBlock {
        language: language.clone(),
        code,
    })
}

fn horizontal_rule(p: &mut Parser<'_>) -> Option<Block> {
    p.eat(TokenKind::HorizontalRule)
        .then_some(Block::HorizontalRule)
}

/// Consecutive `>` lines, re-parsed as a nested document.
fn blockquote(p: &mut Parser<'_>) -> Option<Block> {
    let mut lines = Vec::new();
    while let Some(token) = p.peek() {
        let TokenMeta::Blockquote { content } = &token.meta else {
            break;
        };
        lines.push(content.as_str());
        p.bump();
    }
    if lines.is_empty() {
        return None;
    }
    Some(Block::Blockquote {
        children: crate::parse_markdown(&lines.join("\n")).children,
    })
}

/// Token kinds a paragraph may start with.
fn starts_paragraph(p: &Parser<'_>) -> bool {
    let kind = p.current();
    kind.is_inline()
        || matches!(kind, TokenKind::TableRow | TokenKind::TableSeparator)
        || (kind == TokenKind::SlotMarker && !p.in_component())
}

/// Token kinds that end a paragraph.
pub(super) fn stops_paragraph(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Heading
            | TokenKind::CodeFenceStart
            | TokenKind::CodeFenceEnd
            | TokenKind::BlockquoteLine
            | TokenKind::ListItem
            | TokenKind::HorizontalRule
            | TokenKind::ComponentStart
            | TokenKind::ComponentEnd
            | TokenKind::SlotMarker
            | TokenKind::BlankLine
            | TokenKind::EndOfInput
    )
}

fn paragraph(p: &mut Parser<'_>) -> Option<Block> {
    if !starts_paragraph(p) {
        return None;
    }

    let mut raw = String::new();
    // The first token may itself be a stopper kind (a stray slot marker).
    if let Some(first) = p.bump() {
        raw.push_str(&first.text);
    }
    while !stops_paragraph(p.current()) {
        match p.bump() {
            Some(token) => raw.push_str(&token.text),
            None => break,
        }
    }

    Some(Block::Paragraph {
        children: parse_inline(raw.trim()),
    })
}

#[cfg(test)]
mod tests {
    use crate::ast::{Block, EmphasisStyle, Inline};
    use crate::parse_markdown;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    #[test]
    fn heading_children_are_inline_parsed() {
        let doc = parse_markdown("## Hello *there*");
        assert_eq!(
            doc.children,
            vec![Block::Heading {
                level: 2,
                children: vec![
                    text("Hello "),
                    Inline::Emphasis {
                        style: EmphasisStyle::Italic,
                        children: vec![text("there")]
                    }
                ]
            }]
        );
    }

    #[test]
    fn code_block_keeps_content_verbatim() {
        let doc = parse_markdown("```rust\nfn main() {\n    *x = 1;\n}\n```\n");
        assert_eq!(
            doc.children,
            vec![Block::CodeBlock {
                language: Some("rust".into()),
                code: "fn main() {\n    *x = 1;\n}".into()
            }]
        );
    }

    #[test]
    fn unterminated_code_block_runs_to_end() {
        let doc = parse_markdown("~~~\nstill code\n\n# not heading");
        assert_eq!(
            doc.children,
            vec![Block::CodeBlock {
                language: None,
                code: "still code\n\n# not heading".into()
            }]
        );
    }

    #[test]
    fn empty_code_block() {
        let doc = parse_markdown("```\n```");
        assert_eq!(
            doc.children,
            vec![Block::CodeBlock {
                language: None,
                code: String::new()
            }]
        );
    }

    #[test]
    fn blockquote_is_parsed_recursively() {
        let doc = parse_markdown("> # Inside\n> text\n>\n> more\n\nafter");
        assert_eq!(
            doc.children,
            vec![
                Block::Blockquote {
                    children: vec![
                        Block::Heading {
                            level: 1,
                            children: vec![text("Inside")]
                        },
                        Block::Paragraph {
                            children: vec![text("text")]
                        },
                        Block::Paragraph {
                            children: vec![text("more")]
                        },
                    ]
                },
                Block::Paragraph {
                    children: vec![text("after")]
                },
            ]
        );
    }

    #[test]
    fn paragraph_spans_lines_until_a_stopper() {
        let doc = parse_markdown("line one\nline two\n---\nnext");
        assert_eq!(
            doc.children,
            vec![
                Block::Paragraph {
                    children: vec![text("line one\nline two")]
                },
                Block::HorizontalRule,
                Block::Paragraph {
                    children: vec![text("next")]
                },
            ]
        );
    }

    #[test]
    fn stray_slot_marker_is_text() {
        let doc = parse_markdown("#aside");
        assert_eq!(
            doc.children,
            vec![Block::Paragraph {
                children: vec![text("#aside")]
            }]
        );
    }
}
