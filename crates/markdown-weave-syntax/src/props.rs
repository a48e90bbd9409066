//! Component props.
//!
//! Two syntaxes are accepted inside `::Name{...}`:
//!
//! - object-literal style: `title: "Hi", count: 3, open: true, nested: {a: 1}`
//! - attribute style: `title="Hi" count={3} open`
//!
//! Attribute style is chosen whenever the raw text contains `=`. That check is
//! a heuristic: an object-literal prop whose string value contains `=` (for
//! example `query: "a=b"`) is read as attribute style and comes out wrong.
//! Inline `<Name ... />` components always use attribute style.

use crate::ast::{PropMap, PropValue};
use crate::scan::{matching_close, name_len};

/// Parse a component's raw props text. Never fails; unreadable parts are skipped.
pub fn parse_props(raw: &str) -> PropMap {
    let raw = raw.trim();
    if raw.is_empty() {
        PropMap::new()
    } else if raw.contains('=') {
        parse_attributes(raw)
    } else {
        let mut scanner = Scanner::new(raw);
        scanner.object_body()
    }
}

/// Parse `key="value"` / `key='value'` / `key={expr}` / bare `key` pairs.
pub fn parse_attributes(raw: &str) -> PropMap {
    let mut scanner = Scanner::new(raw);
    let mut props = PropMap::new();
    loop {
        scanner.skip_whitespace();
        if scanner.eof() {
            break;
        }
        let Some(key) = scanner.name() else {
            log::debug!("skipping unreadable attribute text {:?}", scanner.rest());
            scanner.bump();
            continue;
        };
        if !scanner.eat('=') {
            props.insert(key.to_string(), PropValue::Bool(true));
            continue;
        }
        let value = match scanner.peek() {
            Some(q @ ('"' | '\'')) => PropValue::String(scanner.quoted(q)),
            Some('{') => scanner.braced_expression(),
            _ => literal_word(scanner.word()),
        };
        props.insert(key.to_string(), value);
    }
    props
}

/// Interpret an unquoted word.
fn literal_word(word: &str) -> PropValue {
    match word {
        "true" => PropValue::Bool(true),
        "false" => PropValue::Bool(false),
        "null" | "undefined" => PropValue::Null,
        _ => match word.parse::<f64>() {
            Ok(n) if n.is_finite() => PropValue::Number(n),
            _ => PropValue::String(word.to_string()),
        },
    }
}

struct Scanner<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn name(&mut self) -> Option<&'a str> {
        let len = name_len(self.rest(), true)?;
        let name = &self.rest()[..len];
        self.i += len;
        Some(name)
    }

    /// A quoted string starting at the cursor, with backslash escapes resolved.
    /// An unterminated string runs to the end of input.
    fn quoted(&mut self, quote: char) -> String {
        self.bump();
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                    None => out.push('\\'),
                },
                c if c == quote => break,
                c => out.push(c),
            }
        }
        out
    }

    /// `{expr}`: a nested object literal, or a single literal value.
    fn braced_expression(&mut self) -> PropValue {
        let rest = self.rest();
        let Some(close) = matching_close(rest, '{', '}', true) else {
            let word = rest.to_string();
            self.i = self.s.len();
            return PropValue::String(word);
        };
        let inner = rest[1..close].trim();
        self.i += close + 1;

        let mut inner_scanner = Scanner::new(inner);
        match inner_scanner.peek() {
            Some('{') => inner_scanner.object(),
            Some(q @ ('"' | '\'')) => PropValue::String(inner_scanner.quoted(q)),
            _ => literal_word(inner),
        }
    }

    /// A bare word, ending at whitespace or a structural character.
    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | '}' | ':'))
            .unwrap_or(rest.len());
        self.i += len;
        &rest[..len]
    }

    /// `{ ... }` at the cursor, as a map.
    fn object(&mut self) -> PropValue {
        let rest = self.rest();
        let close = matching_close(rest, '{', '}', true).unwrap_or(rest.len());
        let body = rest.get(1..close).unwrap_or("");
        self.i += (close + 1).min(rest.len());
        PropValue::Map(Scanner::new(body).object_body())
    }

    /// Comma separated `key: value` entries, without the surrounding braces.
    fn object_body(&mut self) -> PropMap {
        let mut props = PropMap::new();
        loop {
            self.skip_whitespace();
            while self.eat(',') {
                self.skip_whitespace();
            }
            if self.eof() {
                break;
            }

            let key = match self.peek() {
                Some(q @ ('"' | '\'')) => Some(self.quoted(q)),
                _ => self.name().map(str::to_string),
            };
            let Some(key) = key else {
                log::debug!("skipping unreadable prop text {:?}", self.rest());
                self.bump();
                continue;
            };

            self.skip_whitespace();
            if !self.eat(':') {
                props.insert(key, PropValue::Bool(true));
                continue;
            }
            self.skip_whitespace();

            let value = match self.peek() {
                Some(q @ ('"' | '\'')) => PropValue::String(self.quoted(q)),
                Some('{') => self.object(),
                _ => literal_word(self.word()),
            };
            props.insert(key, value);
        }
        props
    }
}
