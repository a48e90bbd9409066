//! # Transformer
//!
//! Turns a parsed [`Document`] into a list of render [`Node`]s.
//!
//! Every element the transformer builds, whether a built-in tag like `p` or
//! a custom component, goes through one lookup ([`Transformer::resolve`]):
//! if the caller registered an override for the tag, the override's result
//! becomes a [`Node::Host`]; otherwise the default element is used. Unknown
//! components fall back to a visibly flagged `div` instead of failing, and
//! that `div` goes through the same lookup.
//!
//! ## Heading ids
//!
//! Ids come from a [`HeadingIds`] registry. Pick the entry point by how long
//! that registry should live:
//!
//! | Function | Registry |
//! |----------|----------|
//! | [`transform`] / [`transform_with`] | fresh for this call |
//! | [`transform_with_ids`] | caller-owned, reused across calls |
//! | [`transform_continuing`] | process-wide, cleared by [`crate::reset_heading_ids`] |

use std::collections::BTreeMap;

use markdown_weave_config::RenderConfig;
use markdown_weave_syntax::ast::{
    Block, Component, Document, EmphasisStyle, Inline, ListItem, PropMap, PropValue, Table,
    plain_text,
};

use crate::error::RenderError;
use crate::heading_ids::{HeadingIds, with_global_ids};
use crate::highlight::{Highlighted, highlight};
use crate::node::{Node, RenderNode};
use crate::overrides::{OverrideArgs, Overrides};

type Slots<H> = BTreeMap<String, Vec<Node<H>>>;

/// Transform with default options and a fresh heading-id registry.
///
/// ```
/// use markdown_weave_render::{Overrides, transform};
/// use markdown_weave_syntax::parse_markdown;
///
/// let doc = parse_markdown("# Hi\n\nthere");
/// let nodes = transform(&doc, &Overrides::<()>::new()).unwrap();
/// assert_eq!(nodes[0].tag(), Some("h1"));
/// assert_eq!(nodes[1].tag(), Some("p"));
/// ```
pub fn transform<H>(
    document: &Document,
    overrides: &Overrides<H>,
) -> Result<Vec<Node<H>>, RenderError> {
    transform_with(document, overrides, &RenderConfig::default())
}

/// Transform with explicit options and a fresh heading-id registry.
pub fn transform_with<H>(
    document: &Document,
    overrides: &Overrides<H>,
    config: &RenderConfig,
) -> Result<Vec<Node<H>>, RenderError> {
    let mut ids = HeadingIds::new();
    transform_with_ids(document, overrides, config, &mut ids)
}

/// Transform using a caller-owned heading-id registry, so ids stay unique
/// across every document transformed with it.
pub fn transform_with_ids<H>(
    document: &Document,
    overrides: &Overrides<H>,
    config: &RenderConfig,
    ids: &mut HeadingIds,
) -> Result<Vec<Node<H>>, RenderError> {
    Transformer::new(overrides, config, ids).document(document)
}

/// Transform using the process-wide heading-id registry.
///
/// The registry stays locked for the whole call, so an override must not
/// call back into this function.
pub fn transform_continuing<H>(
    document: &Document,
    overrides: &Overrides<H>,
    config: &RenderConfig,
) -> Result<Vec<Node<H>>, RenderError> {
    with_global_ids(|ids| transform_with_ids(document, overrides, config, ids))
}

/// Parse and transform `source` in one step.
pub fn render_markdown<H>(
    source: &str,
    overrides: &Overrides<H>,
) -> Result<Vec<Node<H>>, RenderError> {
    let document = markdown_weave_syntax::parse_markdown(source);
    transform(&document, overrides)
}

/// One transform pass over a document.
pub struct Transformer<'a, H> {
    overrides: &'a Overrides<H>,
    config: &'a RenderConfig,
    ids: &'a mut HeadingIds,
}

impl<'a, H> Transformer<'a, H> {
    pub fn new(
        overrides: &'a Overrides<H>,
        config: &'a RenderConfig,
        ids: &'a mut HeadingIds,
    ) -> Self {
        Self {
            overrides,
            config,
            ids,
        }
    }

    pub fn document(&mut self, document: &Document) -> Result<Vec<Node<H>>, RenderError> {
        let nodes = self.blocks(&document.children)?;
        log::trace!(
            "transformed {} blocks into {} nodes",
            document.children.len(),
            nodes.len()
        );
        Ok(nodes)
    }

    /// The single override lookup. Uses the override registered for
    /// `element.tag` if there is one, otherwise `fallback`.
    fn resolve(
        &self,
        element: RenderNode<H>,
        slots: Slots<H>,
        fallback: impl FnOnce(RenderNode<H>) -> Result<Node<H>, RenderError>,
    ) -> Result<Node<H>, RenderError> {
        let Some(f) = self.overrides.get(&element.tag) else {
            return fallback(element);
        };
        let RenderNode {
            tag,
            props,
            children,
        } = element;
        let args = OverrideArgs {
            tag: tag.clone(),
            props,
            children,
            slots,
        };
        f(args)
            .map(Node::Host)
            .map_err(|source| RenderError::Override { tag, source })
    }

    fn element(&self, element: RenderNode<H>) -> Result<Node<H>, RenderError> {
        self.resolve(element, Slots::new(), |el| Ok(Node::Element(el)))
    }

    /// Fallback for a component nobody registered an override for.
    fn unknown_component(&self, element: RenderNode<H>) -> Result<Node<H>, RenderError> {
        log::debug!("no override for component `{}`", element.tag);
        let div = RenderNode::new("div")
            .prop("class", self.config.unknown_component_class.as_str())
            .prop("data-component", element.tag.as_str())
            .child(Node::text(format!("Unknown component: {}", element.tag)));
        self.element(div)
    }

    fn blocks(&mut self, blocks: &[Block]) -> Result<Vec<Node<H>>, RenderError> {
        blocks.iter().map(|block| self.block(block)).collect()
    }

    fn block(&mut self, block: &Block) -> Result<Node<H>, RenderError> {
        match block {
            Block::Heading { level, children } => self.heading(*level, children),
            Block::Paragraph { children } => {
                let children = self.inlines(children)?;
                self.element(RenderNode::new("p").children(children))
            }
            Block::CodeBlock { language, code } => self.code_block(language.as_deref(), code),
            Block::Blockquote { children } => {
                let children = self.blocks(children)?;
                self.element(RenderNode::new("blockquote").children(children))
            }
            Block::List {
                ordered,
                start,
                items,
            } => self.list(*ordered, *start, items),
            Block::HorizontalRule => self.element(RenderNode::new("hr")),
            Block::Table(table) => self.table(table),
            Block::Component(component) => self.component(component),
        }
    }

    fn heading(&mut self, level: u8, children: &[Inline]) -> Result<Node<H>, RenderError> {
        let mut element = RenderNode::new(format!("h{}", level.clamp(1, 6)));
        if self.config.heading_ids {
            let id = self.ids.next_id(&plain_text(children));
            element = element.prop("id", id);
        }
        let children = self.inlines(children)?;
        self.element(element.children(children))
    }

    fn code_block(&mut self, language: Option<&str>, code: &str) -> Result<Node<H>, RenderError> {
        let children = if self.config.highlight {
            self.highlighted(code, language)?
        } else {
            vec![Node::text(code)]
        };
        let code = self.element(RenderNode::new("code").children(children))?;

        let mut pre = RenderNode::new("pre");
        if let Some(language) = language {
            pre = pre.prop(
                "class",
                format!("{}{language}", self.config.language_class_prefix),
            );
        }
        self.element(pre.child(code))
    }

    fn highlighted(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Result<Vec<Node<H>>, RenderError> {
        highlight(code, language)
            .into_iter()
            .map(|piece| match piece {
                Highlighted::Span { kind, text } => {
                    let class = format!("{}{}", self.config.highlight_class_prefix, kind.as_str());
                    self.element(
                        RenderNode::new("span")
                            .prop("class", class)
                            .child(Node::Text(text)),
                    )
                }
                Highlighted::Raw(text) => Ok(Node::Text(text)),
            })
            .collect()
    }

    fn list(
        &mut self,
        ordered: bool,
        start: Option<u64>,
        items: &[ListItem],
    ) -> Result<Node<H>, RenderError> {
        let mut list = RenderNode::new(if ordered { "ol" } else { "ul" });
        if let Some(start) = start.filter(|&n| ordered && n != 1) {
            list = list.prop("start", start);
        }
        for item in items {
            let item = self.list_item(item)?;
            list = list.child(item);
        }
        self.element(list)
    }

    fn list_item(&mut self, item: &ListItem) -> Result<Node<H>, RenderError> {
        let Some(checked) = item.checked else {
            let children = self.blocks(&item.children)?;
            return self.element(RenderNode::new("li").children(children));
        };

        let checkbox = self.element(
            RenderNode::new("input")
                .prop("type", "checkbox")
                .prop("checked", checked)
                .prop("disabled", true),
        )?;

        // Paragraphs are unwrapped so the label sits inline with the box.
        let mut label = Vec::new();
        for child in &item.children {
            match child {
                Block::Paragraph { children } => label.extend(self.inlines(children)?),
                other => label.push(self.block(other)?),
            }
        }
        let label = self.element(RenderNode::new("span").children(label))?;

        self.element(
            RenderNode::new("li")
                .prop("class", self.config.task_item_class.as_str())
                .child(checkbox)
                .child(label),
        )
    }

    fn table(&mut self, table: &Table) -> Result<Node<H>, RenderError> {
        let header = self.table_row("th", &table.header, table)?;
        let thead = self.element(RenderNode::new("thead").child(header))?;

        let mut tbody = RenderNode::new("tbody");
        for row in &table.rows {
            let row = self.table_row("td", row, table)?;
            tbody = tbody.child(row);
        }
        let tbody = self.element(tbody)?;

        self.element(RenderNode::new("table").child(thead).child(tbody))
    }

    fn table_row(
        &mut self,
        cell_tag: &str,
        cells: &[Vec<Inline>],
        table: &Table,
    ) -> Result<Node<H>, RenderError> {
        let mut tr = RenderNode::new("tr");
        for (column, cell) in cells.iter().enumerate() {
            let mut el = RenderNode::new(cell_tag);
            if let Some(align) = table.alignment(column).as_css() {
                let style = PropMap::from([("text-align".to_string(), PropValue::from(align))]);
                el = el.prop("style", PropValue::Map(style));
            }
            let children = self.inlines(cell)?;
            tr = tr.child(self.element(el.children(children))?);
        }
        self.element(tr)
    }

    fn component(&mut self, component: &Component) -> Result<Node<H>, RenderError> {
        let children = self.blocks(&component.children)?;
        let mut slots = Slots::new();
        for (name, blocks) in &component.slots {
            slots.insert(name.clone(), self.blocks(blocks)?);
        }
        let element = RenderNode {
            tag: component.name.clone(),
            props: component.props.clone(),
            children,
        };
        self.resolve(element, slots, |el| self.unknown_component(el))
    }

    fn inlines(&mut self, inlines: &[Inline]) -> Result<Vec<Node<H>>, RenderError> {
        inlines.iter().map(|inline| self.inline(inline)).collect()
    }

    fn inline(&mut self, inline: &Inline) -> Result<Node<H>, RenderError> {
        match inline {
            Inline::Text(text) => Ok(Node::text(text.as_str())),
            Inline::Code(code) => self.element(
                RenderNode::new("code")
                    .prop("class", self.config.inline_code_class.as_str())
                    .child(Node::text(code.as_str())),
            ),
            Inline::Emphasis { style, children } => {
                let tag = match style {
                    EmphasisStyle::Bold => "strong",
                    EmphasisStyle::Italic => "em",
                    EmphasisStyle::Strikethrough => "del",
                };
                let children = self.inlines(children)?;
                self.element(RenderNode::new(tag).children(children))
            }
            Inline::Link {
                url,
                title,
                children,
            } => {
                let mut a = RenderNode::new("a").prop("href", url.as_str());
                if let Some(title) = title {
                    a = a.prop("title", title.as_str());
                }
                let children = self.inlines(children)?;
                self.element(a.children(children))
            }
            Inline::Image { url, alt, title } => {
                let mut img = RenderNode::new("img")
                    .prop("src", url.as_str())
                    .prop("alt", alt.as_str());
                if let Some(title) = title {
                    img = img.prop("title", title.as_str());
                }
                self.element(img)
            }
            Inline::LineBreak => self.element(RenderNode::new("br")),
            Inline::Component { name, props } => {
                let element = RenderNode {
                    tag: name.clone(),
                    props: props.clone(),
                    children: Vec::new(),
                };
                self.resolve(element, Slots::new(), |el| self.unknown_component(el))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_weave_syntax::parse_markdown;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> Vec<Node<()>> {
        transform(&parse_markdown(source), &Overrides::new()).unwrap()
    }

    fn el(node: &Node<()>) -> &RenderNode<()> {
        node.as_element().expect("element")
    }

    #[test]
    fn heading_gets_slug_id() {
        let nodes = render("## Getting *Started*");
        let h2 = el(&nodes[0]);
        assert_eq!(h2.tag, "h2");
        assert_eq!(h2.get_prop("id"), Some(&PropValue::from("getting-started")));
    }

    #[test]
    fn code_block_is_highlighted() {
        let nodes = render("```js\nlet x\n```");
        let pre = el(&nodes[0]);
        assert_eq!(pre.get_prop("class"), Some(&PropValue::from("language-js")));
        let code = el(&pre.children[0]);
        assert_eq!(code.tag, "code");
        let first = el(&code.children[0]);
        assert_eq!(first.tag, "span");
        assert_eq!(first.get_prop("class"), Some(&PropValue::from("hl-keyword")));
        assert_eq!(code.children[1].as_text(), Some(" "));
    }

    #[test]
    fn ordered_list_start_only_when_not_one() {
        let from_one = render("1. a\n2. b");
        assert_eq!(el(&from_one[0]).get_prop("start"), None);

        let from_three = render("3. a\n4. b");
        let ol = el(&from_three[0]);
        assert_eq!(ol.tag, "ol");
        assert_eq!(ol.get_prop("start"), Some(&PropValue::Number(3.0)));
    }

    #[test]
    fn inline_nodes() {
        let nodes = render("`c` **b** _i_ ~~s~~ [l](/u \"T\") ![a](/img.png)");
        let p = el(&nodes[0]);
        let tags: Vec<_> = p.children.iter().filter_map(Node::tag).collect();
        assert_eq!(tags, vec!["code", "strong", "em", "del", "a", "img"]);

        let code = el(&p.children[0]);
        assert_eq!(code.get_prop("class"), Some(&PropValue::from("inline-code")));

        let a = el(&p.children[8]);
        assert_eq!(a.get_prop("href"), Some(&PropValue::from("/u")));
        assert_eq!(a.get_prop("title"), Some(&PropValue::from("T")));

        let img = el(&p.children[10]);
        assert_eq!(img.get_prop("alt"), Some(&PropValue::from("a")));
        assert_eq!(img.get_prop("title"), None);
    }

    #[test]
    fn unknown_inline_component_falls_back() {
        let nodes = render("see <Badge kind=\"new\" /> here");
        let p = el(&nodes[0]);
        let div = el(&p.children[1]);
        assert_eq!(div.tag, "div");
        assert_eq!(div.get_prop("data-component"), Some(&PropValue::from("Badge")));
        assert_eq!(div.children[0].as_text(), Some("Unknown component: Badge"));
    }
}
