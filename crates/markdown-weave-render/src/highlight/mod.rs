//! # Code Highlighting
//!
//! An approximate, single-pass highlighter for fenced code blocks. It is
//! not a grammar: each language family has a small [Logos] lexer that picks
//! out comments, strings, numbers, identifiers and operators, and anything it
//! does not recognise passes through as raw text. It never fails and always
//! consumes the whole input.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Families
//!
//! | Family | Languages |
//! |--------|-----------|
//! | [`Family::Script`] | js, javascript, jsx, mjs, cjs, ts, typescript, tsx (and anything unknown) |
//! | [`Family::Style`] | css, scss, sass, less |
//! | [`Family::Markup`] | html, htm, xml, svg, vue, svelte |
//!
//! ```
//! use markdown_weave_render::highlight::{highlight, Highlighted, SpanKind};
//!
//! let spans = highlight("let x = 1;", Some("js"));
//! assert_eq!(spans[0], Highlighted::Span { kind: SpanKind::Keyword, text: "let".into() });
//! ```

mod markup;
mod script;
mod style;

/// What a highlighted span is; becomes part of its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Comment,
    String,
    Number,
    Keyword,
    Class,
    Function,
    Variable,
    Operator,
    Punctuation,
    Tag,
    Attribute,
    Property,
    Selector,
    Entity,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::Comment => "comment",
            SpanKind::String => "string",
            SpanKind::Number => "number",
            SpanKind::Keyword => "keyword",
            SpanKind::Class => "class",
            SpanKind::Function => "function",
            SpanKind::Variable => "variable",
            SpanKind::Operator => "operator",
            SpanKind::Punctuation => "punctuation",
            SpanKind::Tag => "tag",
            SpanKind::Attribute => "attribute",
            SpanKind::Property => "property",
            SpanKind::Selector => "selector",
            SpanKind::Entity => "entity",
        }
    }
}

/// One piece of highlighter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlighted {
    Span { kind: SpanKind, text: String },
    Raw(String),
}

impl Highlighted {
    pub fn text(&self) -> &str {
        match self {
            Highlighted::Span { text, .. } | Highlighted::Raw(text) => text,
        }
    }
}

/// Language family, chosen from a code block's language name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Script,
    Style,
    Markup,
}

impl Family {
    /// Unknown or missing languages are treated as script.
    pub fn from_language(language: Option<&str>) -> Self {
        let Some(language) = language else {
            return Family::Script;
        };
        match language.trim().to_ascii_lowercase().as_str() {
            "css" | "scss" | "sass" | "less" => Family::Style,
            "html" | "htm" | "xml" | "svg" | "vue" | "svelte" => Family::Markup,
            _ => Family::Script,
        }
    }
}

/// Split `code` into typed spans and raw text.
///
/// Concatenating the text of every piece gives back `code`.
pub fn highlight(code: &str, language: Option<&str>) -> Vec<Highlighted> {
    let mut buf = SpanBuf::default();
    match Family::from_language(language) {
        Family::Script => script::highlight(code, &mut buf),
        Family::Style => style::highlight(code, &mut buf),
        Family::Markup => markup::highlight(code, &mut buf),
    }
    buf.finish()
}

/// Highlight straight to an HTML fragment: span text is escaped and each
/// typed span becomes `<span class="{class_prefix}{kind}">`.
pub fn highlight_html(code: &str, language: Option<&str>, class_prefix: &str) -> String {
    let mut html = String::with_capacity(code.len() * 2);
    for piece in highlight(code, language) {
        match piece {
            Highlighted::Span { kind, text } => {
                html.push_str("<span class=\"");
                html.push_str(&html_escape::encode_double_quoted_attribute(class_prefix));
                html.push_str(kind.as_str());
                html.push_str("\">");
                html.push_str(&html_escape::encode_text(&text));
                html.push_str("</span>");
            }
            Highlighted::Raw(text) => html.push_str(&html_escape::encode_text(&text)),
        }
    }
    html
}

/// Collects highlighter output, merging adjacent raw runs.
#[derive(Debug, Default)]
pub(crate) struct SpanBuf {
    out: Vec<Highlighted>,
}

impl SpanBuf {
    pub(crate) fn span(&mut self, kind: SpanKind, text: &str) {
        self.out.push(Highlighted::Span {
            kind,
            text: text.to_string(),
        });
    }

    pub(crate) fn raw(&mut self, text: &str) {
        if let Some(Highlighted::Raw(prev)) = self.out.last_mut() {
            prev.push_str(text);
        } else {
            self.out.push(Highlighted::Raw(text.to_string()));
        }
    }

    fn finish(self) -> Vec<Highlighted> {
        self.out
    }
}

/// Length of `rest` up to and including `close`, or all of it when `close`
/// never appears.
pub(crate) fn through_close(rest: &str, close: &str) -> usize {
    rest.find(close).map_or(rest.len(), |i| i + close.len())
}

/// PascalCase: leading uppercase letter followed by at least one lowercase.
pub(crate) fn is_pascal_case(ident: &str) -> bool {
    let mut chars = ident.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase()) && chars.any(|c| c.is_ascii_lowercase())
}
