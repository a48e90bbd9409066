//! Small scanning helpers shared by the tokenizer, the inline parser and the
//! props parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::inline::kinds::LinkSyntax;

static INLINE_COMPONENT_RE: OnceLock<Regex> = OnceLock::new();

/// Returns the byte index of the delimiter that closes the one `s` starts
/// with, honouring nesting and backslash escapes.
///
/// With `skip_quotes`, delimiters inside `"..."` or `'...'` are ignored.
pub(crate) fn matching_close(s: &str, open: char, close: char, skip_quotes: bool) -> Option<usize> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c == open => {}
        _ => return None,
    }

    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        if skip_quotes && (c == '"' || c == '\'') {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Length of an identifier-like name at the start of `s`: an ASCII letter
/// (or `_` when `allow_underscore_start`) followed by ASCII alphanumerics,
/// `-` or `_`.
pub(crate) fn name_len(s: &str, allow_underscore_start: bool) -> Option<usize> {
    let first = s.chars().next()?;
    if !(first.is_ascii_alphabetic() || (allow_underscore_start && first == '_')) {
        return None;
    }
    Some(
        s.bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
            .count(),
    )
}

/// Splits `[text](destination)` at the start of `s`.
///
/// Returns the matched length, the bracket text and the raw destination.
pub(crate) fn link_parts(s: &str) -> Option<(usize, &str, &str)> {
    let close = matching_close(s, LinkSyntax::TEXT_OPEN, LinkSyntax::TEXT_CLOSE, false)?;
    let after = &s[close + 1..];
    let paren = matching_close(after, LinkSyntax::DEST_OPEN, LinkSyntax::DEST_CLOSE, false)?;
    Some((close + 1 + paren + 1, &s[1..close], &after[1..paren]))
}

/// Matches a self-closing `<Name attr="v" />` at the start of `s`.
///
/// Returns the matched length, the component name and the raw attribute text.
pub(crate) fn inline_component(s: &str) -> Option<(usize, &str, &str)> {
    let re = INLINE_COMPONENT_RE.get_or_init(|| {
        Regex::new(r"^<([A-Z][A-Za-z0-9_]*)(\s[^<>]*?)?\s*/>").expect("Invalid component regex")
    });
    let caps = re.captures(s)?;
    let len = caps.get(0)?.end();
    let name = caps.get(1)?.as_str();
    let attrs = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((len, name, attrs))
}
