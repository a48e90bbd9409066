use std::sync::OnceLock;

use regex::Regex;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Em, Escape, HardBreak, InlineComponent, LinkSyntax, Strike, Strong},
};
use crate::ast::{EmphasisStyle, Inline, plain_text};
use crate::props::parse_attributes;
use crate::scan::{inline_component, link_parts};

static LINK_DEST_RE: OnceLock<Regex> = OnceLock::new();

type InlineRule = fn(&mut Cursor<'_>) -> Option<Inline>;

/// Precedence order. Code spans are first, so they act as raw zones.
const INLINE_RULES: [InlineRule; 9] = [
    try_parse_code_span,
    try_parse_escape,
    try_parse_hard_break,
    try_parse_strong,
    try_parse_emphasis,
    try_parse_strikethrough,
    try_parse_image,
    try_parse_link,
    try_parse_component,
];

/// Bytes that may start an inline construct. Plain text runs stop before them.
const SPECIAL: &[u8] = b"`*_~![<\\";

/// Parses inline content into a sequence of [`Inline`] nodes.
///
/// Text between constructs becomes [`Inline::Text`]; adjacent text pieces are
/// merged, so two `Text` nodes never sit next to each other.
pub fn parse_inline(s: &str) -> Vec<Inline> {
    let mut cur = Cursor::new(s);
    let mut out = InlineBuf::default();

    while !cur.eof() {
        match INLINE_RULES.iter().find_map(|rule| rule(&mut cur)) {
            Some(node) => out.push(node),
            None => plain_text_run(&mut cur, &mut out),
        }
    }

    out.nodes
}

/// Output list that merges text.
#[derive(Default)]
struct InlineBuf {
    nodes: Vec<Inline>,
}

impl InlineBuf {
    fn push(&mut self, node: Inline) {
        if let Inline::Text(text) = &node {
            if text.is_empty() {
                return;
            }
            if let Some(Inline::Text(prev)) = self.nodes.last_mut() {
                prev.push_str(text);
                return;
            }
        }
        self.nodes.push(node);
    }
}

/// Consumes at least one character, then up to the next special byte.
fn plain_text_run(cur: &mut Cursor<'_>, out: &mut InlineBuf) {
    let start = cur.i;
    cur.bump();
    while let Some(b) = cur.peek() {
        if SPECIAL.contains(&b) || (b == b' ' && hard_break_len(cur.rest()).is_some()) {
            break;
        }
        cur.bump();
    }
    out.push(Inline::Text(cur.s[start..cur.i].to_string()));
}

/// Attempts to parse a code span. The closing backtick run must match the
/// opening one exactly; an unmatched run is literal text.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let rest = cur.rest();
    let ticks = rest.bytes().take_while(|b| *b == CodeSpan::TICK).count();
    let body = &rest[ticks..];
    let mut search = 0;
    while let Some(found) = body[search..].find(CodeSpan::TICK as char) {
        let at = search + found;
        let run = body[at..]
            .bytes()
            .take_while(|b| *b == CodeSpan::TICK)
            .count();
        if run == ticks {
            cur.bump_n(ticks + at + run);
            return Some(Inline::Code(code_span_content(&body[..at])));
        }
        search = at + run;
    }

    cur.bump_n(ticks);
    Some(Inline::Text(rest[..ticks].to_string()))
}

/// Line endings become spaces; one padding space is stripped from each side.
fn code_span_content(raw: &str) -> String {
    let content = raw.replace("\r\n", " ").replace('\n', " ");
    let padded = content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.trim().is_empty();
    if padded {
        content[1..content.len() - 1].to_string()
    } else {
        content
    }
}

/// `\` before ASCII punctuation yields that character literally; `\` before a
/// newline is a hard break.
fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(Escape::BACKSLASH) {
        return None;
    }
    let next = cur.rest()[1..].chars().next()?;
    if next == '\n' {
        cur.bump_n(2);
        Some(Inline::LineBreak)
    } else if next.is_ascii_punctuation() {
        cur.bump_n(2);
        Some(Inline::Text(next.to_string()))
    } else {
        None
    }
}

fn hard_break_len(rest: &str) -> Option<usize> {
    let spaces = rest.bytes().take_while(|b| *b == b' ').count();
    if spaces < HardBreak::MIN_SPACES {
        return None;
    }
    let after = &rest[spaces..];
    let newline = if after.starts_with("\r\n") {
        2
    } else if after.starts_with('\n') {
        1
    } else {
        return None;
    };
    Some(spaces + newline)
}

fn try_parse_hard_break(cur: &mut Cursor<'_>) -> Option<Inline> {
    let len = hard_break_len(cur.rest())?;
    cur.bump_n(len);
    Some(Inline::LineBreak)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Attempts to parse `**strong**` or `__strong__`.
///
/// When the body opens with another marker (`***both***`), the close is
/// taken from the end of the closing run so the inner emphasis keeps its own
/// delimiters.
fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<Inline> {
    let marker = *Strong::MARKERS.iter().find(|m| cur.starts_with(m))?;
    let marker_byte = marker.as_bytes()[0];
    let underscore = marker_byte == b'_';
    if underscore && cur.prev_char().is_some_and(is_word_char) {
        return None;
    }

    let body = &cur.rest()[marker.len()..];
    if body.is_empty() || body.starts_with(char::is_whitespace) {
        return None;
    }
    let nested_open = body.as_bytes()[0] == marker_byte;

    let mut search = 0;
    while let Some(found) = body[search..].find(marker) {
        let at = search + found;
        let run = body[at..]
            .bytes()
            .take_while(|b| *b == marker_byte)
            .count();
        let close = if nested_open {
            at + run - marker.len()
        } else {
            at
        };
        let inner = &body[..close];
        let after = &body[close + marker.len()..];
        let intraword = underscore && after.starts_with(is_word_char);
        if close > 0 && !inner.ends_with(char::is_whitespace) && !intraword {
            cur.bump_n(marker.len() * 2 + close);
            return Some(Inline::Emphasis {
                style: EmphasisStyle::Bold,
                children: parse_inline(inner),
            });
        }
        search = at + run;
    }
    None
}

/// Attempts to parse `*em*` or `_em_`, skipping over doubled markers inside.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<Inline> {
    let marker = cur.peek().filter(|b| Em::MARKERS.contains(b))?;
    let underscore = marker == b'_';
    if underscore && cur.prev_char().is_some_and(is_word_char) {
        return None;
    }

    let body = &cur.rest()[1..];
    let bytes = body.as_bytes();
    if bytes.first().is_none_or(|b| *b == marker) || body.starts_with(char::is_whitespace) {
        return None;
    }

    let mut j = 0;
    while j < bytes.len() {
        if bytes[j] != marker {
            j += 1;
            continue;
        }
        let run = bytes[j..].iter().take_while(|b| **b == marker).count();
        if run == 1 {
            let inner = &body[..j];
            let intraword = underscore && body[j + 1..].starts_with(is_word_char);
            if !inner.ends_with(char::is_whitespace) && !intraword {
                cur.bump_n(j + 2);
                return Some(Inline::Emphasis {
                    style: EmphasisStyle::Italic,
                    children: parse_inline(inner),
                });
            }
        }
        j += run;
    }
    None
}

/// Attempts to parse `~~struck~~`.
fn try_parse_strikethrough(cur: &mut Cursor<'_>) -> Option<Inline> {
    let body = cur.rest().strip_prefix(Strike::MARKER)?;
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    let mut search = 0;
    while let Some(found) = body[search..].find(Strike::MARKER) {
        let at = search + found;
        let inner = &body[..at];
        if at > 0 && !inner.ends_with(char::is_whitespace) {
            cur.bump_n(Strike::MARKER.len() * 2 + at);
            return Some(Inline::Emphasis {
                style: EmphasisStyle::Strikethrough,
                children: parse_inline(inner),
            });
        }
        search = at + Strike::MARKER.len();
    }
    None
}

/// Splits a link destination into URL and optional quoted title.
fn link_destination(raw: &str) -> (String, Option<String>) {
    let re = LINK_DEST_RE.get_or_init(|| {
        Regex::new(r#"^\s*(<[^>]*>|\S*?)(?:\s+(?:"([^"]*)"|'([^']*)'))?\s*$"#)
            .expect("Invalid link destination regex")
    });
    match re.captures(raw) {
        Some(caps) => {
            let url = caps.get(1).map_or("", |m| m.as_str());
            let url = url
                .strip_prefix('<')
                .and_then(|u| u.strip_suffix('>'))
                .unwrap_or(url);
            let title = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string());
            (url.to_string(), title)
        }
        None => (raw.trim().to_string(), None),
    }
}

/// Attempts to parse `![alt](url "title")`. The alt text is flattened to plain text.
fn try_parse_image(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(LinkSyntax::IMAGE_BANG) {
        return None;
    }
    let (len, alt, dest) = link_parts(&cur.rest()[1..])?;
    let (url, title) = link_destination(dest);
    cur.bump_n(len + 1);
    Some(Inline::Image {
        url,
        alt: plain_text(&parse_inline(alt)),
        title,
    })
}

/// Attempts to parse `[text](url "title")`.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<Inline> {
    if !cur.rest().starts_with(LinkSyntax::TEXT_OPEN) {
        return None;
    }
    let (len, text, dest) = link_parts(cur.rest())?;
    let (url, title) = link_destination(dest);
    cur.bump_n(len);
    Some(Inline::Link {
        url,
        title,
        children: parse_inline(text),
    })
}

/// Attempts to parse a self-closing `<Name attr="v" />`.
fn try_parse_component(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.peek() != Some(InlineComponent::OPEN) {
        return None;
    }
    let (len, name, attrs) = inline_component(cur.rest())?;
    cur.bump_n(len);
    Some(Inline::Component {
        name: name.to_string(),
        props: parse_attributes(attrs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PropValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    fn styled(style: EmphasisStyle, children: Vec<Inline>) -> Inline {
        Inline::Emphasis { style, children }
    }

    #[rstest]
    #[case::unclosed_strong("**open")]
    #[case::unclosed_strike("~~open")]
    #[case::escaped_letter("\\a")]
    #[case::link_without_destination("[text] (u)")]
    #[case::image_without_brackets("!nope")]
    #[case::lowercase_component("<div />")]
    fn failed_rules_leave_cursor_in_place(#[case] input: &str) {
        let mut cur = Cursor::new(input);
        assert!(INLINE_RULES.iter().all(|rule| rule(&mut cur).is_none()));
        assert_eq!(cur.i, 0);
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn bold_between_text_keeps_text_merged() {
        assert_eq!(
            parse_inline("Hello **world** and more"),
            vec![
                text("Hello "),
                styled(EmphasisStyle::Bold, vec![text("world")]),
                text(" and more"),
            ]
        );
    }

    #[test]
    fn emphasis_nests() {
        assert_eq!(
            parse_inline("***both***"),
            vec![styled(
                EmphasisStyle::Bold,
                vec![styled(EmphasisStyle::Italic, vec![text("both")])]
            )]
        );
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![styled(
                EmphasisStyle::Italic,
                vec![
                    text("a "),
                    styled(EmphasisStyle::Bold, vec![text("b")]),
                    text(" c")
                ]
            )]
        );
    }

    #[test]
    fn strikethrough() {
        assert_eq!(
            parse_inline("~~old~~ new"),
            vec![
                styled(EmphasisStyle::Strikethrough, vec![text("old")]),
                text(" new")
            ]
        );
    }

    #[test]
    fn code_span_is_a_raw_zone() {
        assert_eq!(
            parse_inline("`**not bold**` and ``a ` b``"),
            vec![
                Inline::Code("**not bold**".into()),
                text(" and "),
                Inline::Code("a ` b".into()),
            ]
        );
    }

    #[test]
    fn code_span_padding_is_trimmed_once() {
        assert_eq!(parse_inline("``  x  ``"), vec![Inline::Code(" x ".into())]);
        assert_eq!(parse_inline("` `"), vec![Inline::Code(" ".into())]);
    }

    #[rstest]
    #[case("**open")]
    #[case("`open")]
    #[case("* not em *")]
    #[case("snake_case_name")]
    #[case("2 ~~ 3")]
    #[case("[not a link]")]
    #[case("a < b")]
    fn unmatched_markers_stay_text(#[case] input: &str) {
        assert_eq!(parse_inline(input), vec![text(input)]);
    }

    #[test]
    fn backslash_escapes() {
        assert_eq!(parse_inline(r"\*not em\*"), vec![text("*not em*")]);
        assert_eq!(parse_inline(r"C:\path"), vec![text(r"C:\path")]);
    }

    #[test]
    fn hard_breaks() {
        assert_eq!(
            parse_inline("one  \ntwo\\\nthree\nfour"),
            vec![
                text("one"),
                Inline::LineBreak,
                text("two"),
                Inline::LineBreak,
                text("three\nfour"),
            ]
        );
    }

    #[test]
    fn link_with_title_and_nested_emphasis() {
        assert_eq!(
            parse_inline(r#"see [the **docs**](https://x.io "Docs") now"#),
            vec![
                text("see "),
                Inline::Link {
                    url: "https://x.io".into(),
                    title: Some("Docs".into()),
                    children: vec![
                        text("the "),
                        styled(EmphasisStyle::Bold, vec![text("docs")])
                    ],
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn image_alt_and_angle_destination() {
        assert_eq!(
            parse_inline("![a *cat*](<my cat.png> 'Cat')"),
            vec![Inline::Image {
                url: "my cat.png".into(),
                alt: "a cat".into(),
                title: Some("Cat".into()),
            }]
        );
    }

    #[test]
    fn inline_component_uses_attribute_props() {
        let nodes = parse_inline(r#"Status: <Badge tone="ok" count={2} live /> done"#);
        assert_eq!(nodes.len(), 3);
        let Inline::Component { name, props } = &nodes[1] else {
            panic!("expected component, got {nodes:?}");
        };
        assert_eq!(name, "Badge");
        assert_eq!(props["tone"], PropValue::from("ok"));
        assert_eq!(props["count"], PropValue::Number(2.0));
        assert_eq!(props["live"], PropValue::Bool(true));
    }

    #[test]
    fn no_adjacent_text_nodes() {
        let nodes = parse_inline(r"a\*b`c_d ~e! [f <g \h");
        for pair in nodes.windows(2) {
            assert!(
                !matches!(pair, [Inline::Text(_), Inline::Text(_)]),
                "adjacent text in {nodes:?}"
            );
        }
    }
}
