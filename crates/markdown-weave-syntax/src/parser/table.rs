//! Pipe tables.

use super::Parser;
use crate::ast::{Alignment, Block, Inline, Table};
use crate::inline::parse_inline;
use crate::token::TokenMeta;

fn inline_cells(cells: &[String]) -> Vec<Vec<Inline>> {
    cells.iter().map(|cell| parse_inline(cell)).collect()
}

/// A header row followed directly by a separator row, then any data rows.
///
/// Without a separator the cursor is rewound and the rule fails, leaving the
/// header line to the paragraph rule.
pub(super) fn table(p: &mut Parser<'_>) -> Option<Block> {
    let checkpoint = p.checkpoint();
    let header_token = p.bump()?;
    let TokenMeta::TableRow { cells: header } = &header_token.meta else {
        p.rewind(checkpoint);
        return None;
    };

    let mut alignments = match p.peek().map(|t| &t.meta) {
        Some(TokenMeta::TableSeparator { alignments }) => alignments.clone(),
        _ => {
            log::debug!(
                "table row at line {} has no separator row, treating as text",
                header_token.start.line
            );
            p.rewind(checkpoint);
            return None;
        }
    };
    p.bump();
    alignments.resize(header.len(), Alignment::None);

    let mut rows = Vec::new();
    while let Some(token) = p.peek() {
        let TokenMeta::TableRow { cells } = &token.meta else {
            break;
        };
        rows.push(inline_cells(cells));
        p.bump();
    }

    Some(Block::Table(Table {
        header: inline_cells(header),
        rows,
        alignments,
    }))
}
