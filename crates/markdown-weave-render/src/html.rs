//! HTML serialization of a render tree.

use std::fmt::{Display, Write};

use markdown_weave_syntax::ast::{PropMap, PropValue};

use crate::node::{Node, RenderNode};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Render nodes as an HTML string.
///
/// Text is escaped, `true` props become bare attributes, `false` and null
/// props are left out, and map props are written as inline CSS
/// (`k: v; k2: v2`). Host nodes are written with their [`Display`] impl,
/// unescaped.
///
/// ```
/// use markdown_weave_render::{Overrides, render_markdown, to_html};
///
/// let nodes = render_markdown::<String>("Hello **you**", &Overrides::new()).unwrap();
/// assert_eq!(to_html(&nodes), "<p>Hello <strong>you</strong></p>");
/// ```
pub fn to_html<H: Display>(nodes: &[Node<H>]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node<H: Display>(out: &mut String, node: &Node<H>) {
    match node {
        Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Element(element) => write_element(out, element),
        Node::Host(host) => {
            let _ = write!(out, "{host}");
        }
    }
}

fn write_element<H: Display>(out: &mut String, element: &RenderNode<H>) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.props {
        write_attribute(out, name, value);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn write_attribute(out: &mut String, name: &str, value: &PropValue) {
    let value = match value {
        PropValue::Null | PropValue::Bool(false) => return,
        PropValue::Bool(true) => {
            out.push(' ');
            out.push_str(name);
            return;
        }
        PropValue::Number(n) => format_number(*n),
        PropValue::String(s) => s.clone(),
        PropValue::Map(map) => style_value(map),
    };
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(&value));
    out.push('"');
}

/// Whole numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn style_value(map: &PropMap) -> String {
    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                PropValue::String(s) => s.clone(),
                PropValue::Number(n) => format_number(*n),
                PropValue::Bool(b) => b.to_string(),
                PropValue::Null | PropValue::Map(_) => return None,
            };
            Some(format!("{key}: {value}"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
