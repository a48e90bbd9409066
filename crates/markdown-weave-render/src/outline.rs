//! Table-of-contents extraction.

use markdown_weave_syntax::ast::{Block, Document, plain_text};
use serde::Serialize;

use crate::heading_ids::HeadingIds;

/// One heading in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    /// Same id [`crate::transform`] gives this heading.
    pub id: String,
}

/// Every heading in `document`, including those nested in blockquotes,
/// list items and components.
pub fn outline(document: &Document) -> Vec<HeadingEntry> {
    let mut ids = HeadingIds::new();
    let mut entries = Vec::new();
    collect(&document.children, &mut ids, &mut entries);
    entries
}

// Must visit headings in the same order as the transformer, or ids drift.
fn collect(blocks: &[Block], ids: &mut HeadingIds, entries: &mut Vec<HeadingEntry>) {
    for block in blocks {
        match block {
            Block::Heading { level, children } => {
                let text = plain_text(children);
                let id = ids.next_id(&text);
                entries.push(HeadingEntry {
                    level: *level,
                    text,
                    id,
                });
            }
            Block::Blockquote { children } => collect(children, ids, entries),
            Block::List { items, .. } => {
                for item in items {
                    collect(&item.children, ids, entries);
                }
            }
            Block::Component(component) => {
                collect(&component.children, ids, entries);
                for slot in component.slots.values() {
                    collect(slot, ids, entries);
                }
            }
            Block::Paragraph { .. }
            | Block::CodeBlock { .. }
            | Block::HorizontalRule
            | Block::Table(_) => {}
        }
    }
}
