use crate::token::Position;

/// Tracks `(offset, line, column)` while the tokenizer walks the input.
///
/// The cursor only ever moves forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceCursor {
    pos: Position,
}

impl SourceCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn offset(&self) -> usize {
        self.pos.offset
    }

    /// True when no character of the current line has been consumed yet.
    pub fn at_line_start(&self) -> bool {
        self.pos.column == 1
    }

    /// Moves to `offset`, updating line and column for every character
    /// skipped. Offsets at or behind the cursor are ignored.
    pub fn advance_to(&mut self, input: &str, offset: usize) {
        if offset <= self.pos.offset {
            return;
        }
        for c in input[self.pos.offset..offset].chars() {
            if c == '\n' {
                self.pos.line += 1;
                self.pos.column = 1;
            } else {
                self.pos.column += 1;
            }
        }
        self.pos.offset = offset;
    }
}
