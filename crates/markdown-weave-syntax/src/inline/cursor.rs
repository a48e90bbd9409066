/// A cursor over the text handed to the inline parser.
///
/// Rules look ahead with [`rest`](Self::rest) and [`peek`](Self::peek) and
/// only advance once a construct has matched, so a failed rule leaves the
/// position where it was.
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Unparsed remainder.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The character just before the cursor.
    pub fn prev_char(&self) -> Option<char> {
        self.s[..self.i].chars().next_back()
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one character, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }
}
