//! Render tree types.
//!
//! The transformer's output is a list of [`Node`]s: generic elements, plain
//! strings, or whatever a caller's override produced (`H`). Nothing in this
//! crate looks inside `H`.

use markdown_weave_syntax::ast::{PropMap, PropValue};
use serde::Serialize;

/// One node of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node<H> {
    Element(RenderNode<H>),
    Text(String),
    /// Produced by an override function.
    Host(H),
}

/// A tagged element: `tag`, props and owned children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode<H> {
    pub tag: String,
    pub props: PropMap,
    pub children: Vec<Node<H>>,
}

impl<H> RenderNode<H> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: PropMap::new(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: Node<H>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<Node<H>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }
}

impl<H> Node<H> {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&RenderNode<H>> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_host(&self) -> Option<&H> {
        match self {
            Node::Host(h) => Some(h),
            _ => None,
        }
    }

    /// Element tag, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }
}

impl<H> From<RenderNode<H>> for Node<H> {
    fn from(value: RenderNode<H>) -> Self {
        Node::Element(value)
    }
}

/// Concatenated text of a node list, descending into elements. Host nodes
/// contribute nothing.
pub fn text_content<H>(nodes: &[Node<H>]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => out.push_str(&text_content(&el.children)),
            Node::Host(_) => {}
        }
    }
    out
}
