//! Line-level matchers.
//!
//! Each matcher looks at one line (without its line ending) and either
//! rejects it or returns the token kind and metadata for the whole line.
//! They are tried in the fixed order of [`LINE_MATCHERS`]; the first match
//! wins.

use crate::ast::Alignment;
use crate::scan::{matching_close, name_len};
use crate::token::{TokenKind, TokenMeta};

pub type LineMatch = (TokenKind, TokenMeta);
type LineMatcher = fn(&str) -> Option<LineMatch>;

/// Priority order for constructs recognised at the start of a line.
const LINE_MATCHERS: [LineMatcher; 10] = [
    blank_line,
    heading,
    fence_start,
    horizontal_rule,
    blockquote,
    list_item,
    table_row,
    component_end,
    component_start,
    slot_marker,
];

/// Runs the line matchers in priority order.
pub fn match_line(line: &str) -> Option<LineMatch> {
    LINE_MATCHERS.iter().find_map(|matcher| matcher(line))
}

fn blank_line(line: &str) -> Option<LineMatch> {
    line.trim()
        .is_empty()
        .then_some((TokenKind::BlankLine, TokenMeta::None))
}

/// ATX heading syntax.
pub struct Heading;

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Drops a closing `#` run, but only when a space separates it from the text.
    fn strip_closing_sequence(content: &str) -> &str {
        let without = content.trim_end_matches(Self::MARKER as char);
        if without.len() == content.len() {
            content
        } else if without.is_empty() || without.ends_with(' ') {
            without.trim_end()
        } else {
            content
        }
    }
}

fn heading(line: &str) -> Option<LineMatch> {
    let hashes = line.bytes().take_while(|b| *b == Heading::MARKER).count();
    if hashes == 0 || hashes > Heading::MAX_LEVEL {
        return None;
    }
    let content = line[hashes..].strip_prefix(' ')?;
    Some((
        TokenKind::Heading,
        TokenMeta::Heading {
            level: hashes as u8,
            content: Heading::strip_closing_sequence(content.trim()).to_string(),
        },
    ))
}

/// An open code fence, remembered by the tokenizer until it is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub marker: char,
    pub len: usize,
}

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;

    /// Parses an opening fence line, returning the fence and its language.
    pub fn open(line: &str) -> Option<(CodeFence, Option<String>)> {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next()?;
        if marker != Self::BACKTICK && marker != Self::TILDE {
            return None;
        }
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        if len < Self::MIN_LEN {
            return None;
        }
        // Both markers are single-byte, so `len` is also a byte count.
        let info = trimmed[len..].trim();
        if marker == Self::BACKTICK && info.contains(Self::BACKTICK) {
            return None;
        }
        let language = info.split_whitespace().next().map(str::to_string);
        Some((CodeFence { marker, len }, language))
    }

    /// Whether `line` closes this fence: same marker, at least as long,
    /// nothing else on the line.
    pub fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && run == trimmed.len()
    }
}

fn fence_start(line: &str) -> Option<LineMatch> {
    let (_, language) = CodeFence::open(line)?;
    Some((TokenKind::CodeFenceStart, TokenMeta::Fence { language }))
}

fn horizontal_rule(line: &str) -> Option<LineMatch> {
    let trimmed = line.trim();
    let marker = trimmed.chars().next()?;
    if !matches!(marker, '-' | '*' | '_') {
        return None;
    }
    let mut count = 0;
    for c in trimmed.chars() {
        if c == marker {
            count += 1;
        } else if !c.is_whitespace() {
            return None;
        }
    }
    (count >= 3).then_some((TokenKind::HorizontalRule, TokenMeta::None))
}

fn blockquote(line: &str) -> Option<LineMatch> {
    let rest = line.trim_start().strip_prefix('>')?;
    let content = rest.strip_prefix(' ').unwrap_or(rest);
    Some((
        TokenKind::BlockquoteLine,
        TokenMeta::Blockquote {
            content: content.to_string(),
        },
    ))
}

/// List marker syntax.
pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    /// Columns a tab is worth when measuring indentation.
    pub const TAB_WIDTH: usize = 2;
    /// Columns per nesting level.
    pub const DEPTH_UNIT: usize = 2;

    /// Returns `(indent_width, indent_bytes)`.
    pub fn indentation(line: &str) -> (usize, usize) {
        let mut width = 0;
        let mut bytes = 0;
        for c in line.chars() {
            match c {
                ' ' => width += 1,
                '\t' => width += Self::TAB_WIDTH,
                _ => break,
            }
            bytes += 1;
        }
        (width, bytes)
    }

    fn bullet_body(rest: &str) -> Option<&str> {
        let first = rest.chars().next()?;
        if !Self::BULLETS.contains(&first) {
            return None;
        }
        rest[1..].strip_prefix(' ')
    }

    fn ordered_body(rest: &str) -> Option<(u64, &str)> {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || digits > 9 {
            return None;
        }
        let number = rest[..digits].parse().ok()?;
        let body = rest[digits..].strip_prefix(". ")?;
        Some((number, body))
    }

    /// Splits a leading `[ ]`, `[x]` or `[X]` off the item text.
    pub fn task_state(body: &str) -> (Option<bool>, &str) {
        let checked = match body.get(..3) {
            Some("[ ]") => false,
            Some("[x]") | Some("[X]") => true,
            _ => return (None, body),
        };
        let rest = &body[3..];
        if rest.is_empty() {
            (Some(checked), rest)
        } else if let Some(text) = rest.strip_prefix(' ') {
            (Some(checked), text)
        } else {
            (None, body)
        }
    }
}

fn list_item(line: &str) -> Option<LineMatch> {
    let (width, indent_bytes) = ListMarker::indentation(line);
    let rest = &line[indent_bytes..];

    let (ordered, number, body) = if let Some(body) = ListMarker::bullet_body(rest) {
        (false, None, body)
    } else {
        let (number, body) = ListMarker::ordered_body(rest)?;
        (true, Some(number), body)
    };
    let (checked, content) = ListMarker::task_state(body);

    Some((
        TokenKind::ListItem,
        TokenMeta::ListItem {
            ordered,
            number,
            depth: width / ListMarker::DEPTH_UNIT,
            checked,
            content: content.trim_end().to_string(),
        },
    ))
}

/// Pipe table rows.
pub struct TableLine;

impl TableLine {
    pub const PIPE: char = '|';

    /// Splits a row on unescaped pipes. `\|` yields a literal pipe.
    pub fn cells(line: &str) -> Option<Vec<String>> {
        let trimmed = line.trim();
        let inner = trimmed.strip_prefix(Self::PIPE)?;
        let inner = match inner.strip_suffix(Self::PIPE) {
            Some(stripped) if !stripped.ends_with('\\') => stripped,
            _ => inner,
        };

        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        Some(cells)
    }

    /// A separator cell holds only colons, dashes and whitespace, with at
    /// least one dash.
    pub fn is_separator_cell(cell: &str) -> bool {
        cell.contains('-')
            && cell
                .chars()
                .all(|c| c == ':' || c == '-' || c.is_whitespace())
    }

    pub fn alignment(cell: &str) -> Alignment {
        let cell = cell.trim();
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        }
    }
}

fn table_row(line: &str) -> Option<LineMatch> {
    let cells = TableLine::cells(line)?;
    if cells.iter().all(|c| TableLine::is_separator_cell(c)) {
        let alignments = cells.iter().map(|c| TableLine::alignment(c)).collect();
        Some((
            TokenKind::TableSeparator,
            TokenMeta::TableSeparator { alignments },
        ))
    } else {
        Some((TokenKind::TableRow, TokenMeta::TableRow { cells }))
    }
}

/// `::Name{props}` component fences.
pub struct ComponentFence;

impl ComponentFence {
    pub const FENCE: &'static str = "::";
}

fn component_end(line: &str) -> Option<LineMatch> {
    (line.trim() == ComponentFence::FENCE).then_some((TokenKind::ComponentEnd, TokenMeta::None))
}

fn component_start(line: &str) -> Option<LineMatch> {
    let rest = line.strip_prefix(ComponentFence::FENCE)?;
    let len = name_len(rest, false)?;
    let name = &rest[..len];
    let mut rest = &rest[len..];

    let mut props = "";
    if rest.starts_with('{') {
        let close = matching_close(rest, '{', '}', true)?;
        props = rest[1..close].trim();
        rest = &rest[close + 1..];
    }

    let self_closing = match rest.trim() {
        "" => false,
        ComponentFence::FENCE => true,
        _ => return None,
    };
    Some((
        TokenKind::ComponentStart,
        TokenMeta::Component {
            name: name.to_string(),
            props: props.to_string(),
            self_closing,
        },
    ))
}

fn slot_marker(line: &str) -> Option<LineMatch> {
    let rest = line.trim().strip_prefix('#')?;
    let len = name_len(rest, true)?;
    (len == rest.len()).then(|| {
        (
            TokenKind::SlotMarker,
            TokenMeta::Slot {
                name: rest.to_string(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kind(line: &str) -> Option<TokenKind> {
        match_line(line).map(|(k, _)| k)
    }

    #[rstest]
    #[case("", Some(TokenKind::BlankLine))]
    #[case("   \t", Some(TokenKind::BlankLine))]
    #[case("# Title", Some(TokenKind::Heading))]
    #[case("###### Six", Some(TokenKind::Heading))]
    #[case("####### Seven", None)]
    #[case("#NoSpace", Some(TokenKind::SlotMarker))]
    #[case("```rust", Some(TokenKind::CodeFenceStart))]
    #[case("~~~", Some(TokenKind::CodeFenceStart))]
    #[case("``", None)]
    #[case("---", Some(TokenKind::HorizontalRule))]
    #[case("* * *", Some(TokenKind::HorizontalRule))]
    #[case("> quoted", Some(TokenKind::BlockquoteLine))]
    #[case("- item", Some(TokenKind::ListItem))]
    #[case("12. item", Some(TokenKind::ListItem))]
    #[case("-item", None)]
    #[case("| a | b |", Some(TokenKind::TableRow))]
    #[case("|---|:-:|", Some(TokenKind::TableSeparator))]
    #[case("::", Some(TokenKind::ComponentEnd))]
    #[case("::Card{title: \"x\"}", Some(TokenKind::ComponentStart))]
    #[case("::Card", Some(TokenKind::ComponentStart))]
    #[case("::Card trailing", None)]
    #[case("plain text", None)]
    fn line_classification(#[case] line: &str, #[case] expected: Option<TokenKind>) {
        assert_eq!(kind(line), expected);
    }

    #[test]
    fn heading_strips_closing_sequence() {
        let (_, meta) = match_line("## Title ##").unwrap();
        assert_eq!(
            meta,
            TokenMeta::Heading {
                level: 2,
                content: "Title".into()
            }
        );

        let (_, meta) = match_line("# C#").unwrap();
        assert_eq!(
            meta,
            TokenMeta::Heading {
                level: 1,
                content: "C#".into()
            }
        );
    }

    #[test]
    fn fence_records_language_and_closes_on_same_marker() {
        let (fence, language) = CodeFence::open("````ts extra").unwrap();
        assert_eq!(language.as_deref(), Some("ts"));
        assert_eq!(fence.len, 4);
        assert!(!fence.closes("```"));
        assert!(fence.closes("`````"));
        assert!(!fence.closes("~~~~"));
        assert!(!fence.closes("```` x"));
    }

    #[test]
    fn list_item_depth_and_task_state() {
        let (_, meta) = match_line("\t  - [x] done").unwrap();
        assert_eq!(
            meta,
            TokenMeta::ListItem {
                ordered: false,
                number: None,
                depth: 2,
                checked: Some(true),
                content: "done".into()
            }
        );

        let (_, meta) = match_line("3. [ ] todo").unwrap();
        assert_eq!(
            meta,
            TokenMeta::ListItem {
                ordered: true,
                number: Some(3),
                depth: 0,
                checked: Some(false),
                content: "todo".into()
            }
        );
    }

    #[test]
    fn bracket_without_space_is_not_a_task() {
        assert_eq!(ListMarker::task_state("[x]y"), (None, "[x]y"));
        assert_eq!(ListMarker::task_state("[X]"), (Some(true), ""));
    }

    #[test]
    fn table_cells_and_alignments() {
        assert_eq!(
            TableLine::cells(r"| a \| b | c |").unwrap(),
            vec!["a | b".to_string(), "c".to_string()]
        );

        let (_, meta) = match_line("| :--- | ---: | :-: | --- |").unwrap();
        assert_eq!(
            meta,
            TokenMeta::TableSeparator {
                alignments: vec![
                    Alignment::Left,
                    Alignment::Right,
                    Alignment::Center,
                    Alignment::None
                ]
            }
        );
    }

    #[test]
    fn separator_needs_a_dash_in_every_cell() {
        assert_eq!(kind("| --- | : |"), Some(TokenKind::TableRow));
        assert_eq!(kind("| not a separator |"), Some(TokenKind::TableRow));
    }

    #[test]
    fn component_start_self_closing_and_props() {
        let (_, meta) = match_line("::Alert{type=\"warn\"}::").unwrap();
        assert_eq!(
            meta,
            TokenMeta::Component {
                name: "Alert".into(),
                props: "type=\"warn\"".into(),
                self_closing: true
            }
        );

        let (_, meta) = match_line("::Tabs{ a: {b: 1} }").unwrap();
        assert_eq!(
            meta,
            TokenMeta::Component {
                name: "Tabs".into(),
                props: "a: {b: 1}".into(),
                self_closing: false
            }
        );
    }

    #[test]
    fn slot_marker_requires_bare_name() {
        let (_, meta) = match_line("#footer").unwrap();
        assert_eq!(
            meta,
            TokenMeta::Slot {
                name: "footer".into()
            }
        );
        assert_eq!(kind("#footer and more"), None);
    }
}
