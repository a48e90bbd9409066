//! Inline matchers, tried anywhere inside a line.
//!
//! Each one receives the rest of the current line and returns the byte length
//! it consumed. They never look across a line ending.

use crate::scan::{inline_component, link_parts};
use crate::token::{TokenKind, TokenMeta};

pub type InlineMatch = (usize, TokenKind, TokenMeta);
type InlineMatcher = fn(&str) -> Option<InlineMatch>;

const INLINE_MATCHERS: [InlineMatcher; 5] = [code, emphasis, image, link, component];

/// Runs the inline matchers in priority order.
pub fn match_inline(rest: &str) -> Option<InlineMatch> {
    INLINE_MATCHERS.iter().find_map(|matcher| matcher(rest))
}

/// Backtick code spans. The closing run must be exactly as long as the opening.
fn code(rest: &str) -> Option<InlineMatch> {
    let ticks = rest.bytes().take_while(|b| *b == b'`').count();
    if ticks == 0 {
        return None;
    }
    let body = &rest[ticks..];
    let mut search = 0;
    while let Some(found) = body[search..].find('`') {
        let at = search + found;
        let run = body[at..].bytes().take_while(|b| *b == b'`').count();
        if run == ticks && at > 0 {
            return Some((
                ticks + at + run,
                TokenKind::InlineCode,
                TokenMeta::Delimited {
                    inner: body[..at].to_string(),
                },
            ));
        }
        search = at + run;
    }
    None
}

/// Double-character markers first so `**` is never read as two `*`.
const EMPHASIS_MARKERS: [(&str, TokenKind); 5] = [
    ("**", TokenKind::Bold),
    ("__", TokenKind::Bold),
    ("~~", TokenKind::Strikethrough),
    ("*", TokenKind::Italic),
    ("_", TokenKind::Italic),
];

fn emphasis(rest: &str) -> Option<InlineMatch> {
    EMPHASIS_MARKERS
        .iter()
        .find_map(|(marker, kind)| delimited(rest, marker, *kind))
}

fn delimited(rest: &str, marker: &str, kind: TokenKind) -> Option<InlineMatch> {
    let body = rest.strip_prefix(marker)?;
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    if marker.len() == 1 && body.starts_with(marker) {
        return None;
    }

    let mut search = 0;
    while let Some(found) = body[search..].find(marker) {
        let at = search + found;
        let doubled = marker.len() == 1
            && (body[at + 1..].starts_with(marker) || body[..at].ends_with(marker));
        if at > 0 && !doubled && !body[..at].ends_with(char::is_whitespace) {
            return Some((
                marker.len() * 2 + at,
                kind,
                TokenMeta::Delimited {
                    inner: body[..at].to_string(),
                },
            ));
        }
        search = at + marker.len();
    }
    None
}

fn image(rest: &str) -> Option<InlineMatch> {
    let (len, alt, url) = link_parts(rest.strip_prefix('!')?)?;
    Some((
        len + 1,
        TokenKind::Image,
        TokenMeta::Image {
            alt: alt.to_string(),
            url: url.trim().to_string(),
        },
    ))
}

fn link(rest: &str) -> Option<InlineMatch> {
    let (len, text, url) = link_parts(rest)?;
    Some((
        len,
        TokenKind::Link,
        TokenMeta::Link {
            text: text.to_string(),
            url: url.trim().to_string(),
        },
    ))
}

fn component(rest: &str) -> Option<InlineMatch> {
    let (len, name, props) = inline_component(rest)?;
    Some((
        len,
        TokenKind::InlineComponent,
        TokenMeta::InlineComponent {
            name: name.to_string(),
            props: props.to_string(),
        },
    ))
}
