//! # markdown-weave-render
//!
//! Back half of the markdown-weave pipeline: AST → render tree.
//!
//! ```text
//! Document ──transform──▶ Vec<Node<H>> ──to_html──▶ String
//!                ▲
//!          Overrides<H>
//! ```
//!
//! The render tree is host-agnostic. Built-in elements are plain
//! [`RenderNode`]s (`tag`, `props`, `children`), and any tag, built-in or
//! custom component, can be replaced by registering an override that builds
//! the host's own node type `H`.
//!
//! ```
//! use markdown_weave_render::{Overrides, render_markdown, to_html};
//!
//! let overrides = Overrides::new().with("Shout", |args| {
//!     let text = args.props.get("text").and_then(|v| v.as_str()).unwrap_or("");
//!     Ok(format!("<b>{}</b>", text.to_uppercase()))
//! });
//!
//! let nodes = render_markdown("::Shout{text: \"hi\"}::", &overrides).unwrap();
//! assert_eq!(to_html(&nodes), "<b>HI</b>");
//! ```

pub mod error;
pub mod heading_ids;
pub mod highlight;
pub mod html;
pub mod node;
pub mod outline;
pub mod overrides;
pub mod transform;

pub use error::RenderError;
pub use heading_ids::{HeadingIds, reset_heading_ids, slugify};
pub use highlight::{Highlighted, SpanKind, highlight, highlight_html};
pub use html::to_html;
pub use markdown_weave_config::RenderConfig;
pub use node::{Node, RenderNode, text_content};
pub use outline::{HeadingEntry, outline};
pub use overrides::{OverrideArgs, OverrideFn, Overrides};
pub use transform::{
    Transformer, render_markdown, transform, transform_continuing, transform_with,
    transform_with_ids,
};
