//! List grammar.
//!
//! Lists are parsed depth-first: [`list`] collects the items at one target
//! depth and recurses whenever an item is indented further, attaching the
//! nested list to the item just before it.

use super::Parser;
use crate::ast::{Block, ListItem};
use crate::inline::parse_inline;
use crate::token::{TokenKind, TokenMeta};

/// Depth and ordering of the list item at the cursor.
fn item_shape(p: &Parser<'_>) -> Option<(usize, bool)> {
    match &p.peek()?.meta {
        TokenMeta::ListItem { depth, ordered, .. } => Some((*depth, *ordered)),
        _ => None,
    }
}

pub(super) fn list_block(p: &mut Parser<'_>) -> Option<Block> {
    let (depth, _) = item_shape(p)?;
    Some(list(p, depth))
}

/// Whether the list at `depth` picks up again after blank lines.
fn continues_after_blank(p: &Parser<'_>, depth: usize, ordered: bool) -> bool {
    match item_shape(p) {
        Some((d, o)) => d > depth || (d == depth && o == ordered),
        None => false,
    }
}

/// Parse the items at `depth`. The cursor must be on a list item of that depth.
fn list(p: &mut Parser<'_>, depth: usize) -> Block {
    let mut ordered = false;
    let mut start = None;
    if let Some(TokenMeta::ListItem {
        ordered: o, number, ..
    }) = p.peek().map(|t| &t.meta)
    {
        ordered = *o;
        start = if *o { *number } else { None };
    }

    let mut items: Vec<ListItem> = Vec::new();
    loop {
        if p.at(TokenKind::BlankLine) {
            let cp = p.checkpoint();
            while p.eat(TokenKind::BlankLine) {}
            if continues_after_blank(p, depth, ordered) {
                continue;
            }
            p.rewind(cp);
            break;
        }

        let Some((item_depth, item_ordered)) = item_shape(p) else {
            break;
        };
        if item_depth < depth {
            break;
        }
        if item_depth > depth {
            let nested = list(p, item_depth);
            match items.last_mut() {
                Some(item) => item.children.push(nested),
                None => items.push(ListItem {
                    checked: None,
                    children: vec![nested],
                }),
            }
            continue;
        }
        if item_ordered != ordered {
            break;
        }

        items.push(list_item(p));
    }

    Block::List {
        ordered,
        start,
        items,
    }
}

/// One item: its own line plus any inline-only lines directly after it.
fn list_item(p: &mut Parser<'_>) -> ListItem {
    let mut checked = None;
    let mut text = String::new();
    if let Some(TokenMeta::ListItem {
        checked: c,
        content,
        ..
    }) = p.bump().map(|t| &t.meta)
    {
        checked = *c;
        text.push_str(content);
    }

    let mut continuation = String::new();
    while p.current().is_inline() {
        match p.bump() {
            Some(token) => continuation.push_str(&token.text),
            None => break,
        }
    }
    for line in continuation.lines().map(str::trim).filter(|l| !l.is_empty()) {
        text.push('\n');
        text.push_str(line);
    }

    let text = text.trim();
    let children = if text.is_empty() {
        Vec::new()
    } else {
        vec![Block::Paragraph {
            children: parse_inline(text),
        }]
    };
    ListItem { checked, children }
}
