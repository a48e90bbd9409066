//! Delimiters owned by each inline construct.
//!
//! The inline rules and the link scanner read their markers from here.

/// `` `code` ``
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

/// `**strong**` / `__strong__`
pub struct Strong;

impl Strong {
    pub const MARKERS: [&'static str; 2] = ["**", "__"];
}

/// `*em*` / `_em_`
pub struct Em;

impl Em {
    pub const MARKERS: [u8; 2] = [b'*', b'_'];
}

/// `~~struck~~`
pub struct Strike;

impl Strike {
    pub const MARKER: &'static str = "~~";
}

/// `[text](url "title")` and `![alt](url)`
pub struct LinkSyntax;

impl LinkSyntax {
    pub const IMAGE_BANG: u8 = b'!';
    pub const TEXT_OPEN: char = '[';
    pub const TEXT_CLOSE: char = ']';
    pub const DEST_OPEN: char = '(';
    pub const DEST_CLOSE: char = ')';
}

/// `\*` escapes and `\` + newline breaks.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
}

/// Two or more spaces before a newline.
pub struct HardBreak;

impl HardBreak {
    pub const MIN_SPACES: usize = 2;
}

/// `<Name attr="v" />`
pub struct InlineComponent;

impl InlineComponent {
    pub const OPEN: u8 = b'<';
}
