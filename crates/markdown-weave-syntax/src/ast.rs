//! Abstract syntax tree produced by the parser.
//!
//! Two levels: [`Block`] nodes for structure and [`Inline`] nodes for
//! text-level formatting. Both are closed enums so consumers match
//! exhaustively.

use std::collections::BTreeMap;

use serde::Serialize;

/// Component properties, keyed by prop name.
pub type PropMap = BTreeMap<String, PropValue>;

/// A literal value attached to a component prop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Map(PropMap),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<u64> for PropValue {
    fn from(value: u64) -> Self {
        PropValue::Number(value as f64)
    }
}

/// Column alignment declared by a table separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value, if the column is aligned.
    pub fn as_css(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// The root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        /// 1 through 6.
        level: u8,
        children: Vec<Inline>,
    },
    Paragraph {
        children: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Blockquote {
        children: Vec<Block>,
    },
    List {
        ordered: bool,
        /// First item number, only for ordered lists.
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    HorizontalRule,
    Table(Table),
    Component(Component),
}

/// One entry of a [`Block::List`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    /// `Some` for task items (`[ ]` / `[x]`).
    pub checked: Option<bool>,
    pub children: Vec<Block>,
}

/// A pipe table. Cells are inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
    /// One entry per header cell.
    pub alignments: Vec<Alignment>,
}

impl Table {
    /// Alignment for a column; columns past the header have none.
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments
            .get(column)
            .copied()
            .unwrap_or(Alignment::None)
    }
}

/// A `::Name{props}` component block.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub props: PropMap,
    /// Blocks outside any `#slot` marker.
    pub children: Vec<Block>,
    /// Blocks following each `#slot` marker, keyed by slot name.
    pub slots: BTreeMap<String, Vec<Block>>,
    pub self_closing: bool,
}

/// Emphasis flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisStyle {
    Bold,
    Italic,
    Strikethrough,
}

/// Inline-level node.
///
/// Invariant: a `Text` node is never directly followed by another `Text`
/// node in the same children list.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis {
        style: EmphasisStyle,
        children: Vec<Inline>,
    },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    Image {
        url: String,
        alt: String,
        title: Option<String>,
    },
    LineBreak,
    Component {
        name: String,
        props: PropMap,
    },
}

/// Flatten inline content into the text a reader would see.
///
/// Used for heading ids and outlines.
pub fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(s) | Inline::Code(s) => out.push_str(s),
            Inline::Emphasis { children, .. } | Inline::Link { children, .. } => {
                collect_text(children, out)
            }
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push(' '),
            Inline::Component { .. } => {}
        }
    }
}
