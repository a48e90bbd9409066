//! Caller-supplied replacements for default element construction.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use markdown_weave_syntax::ast::PropMap;

use crate::node::Node;

/// Everything an override receives for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideArgs<H> {
    /// The tag being resolved: a built-in like `h1`/`p` or a component name.
    pub tag: String,
    pub props: PropMap,
    pub children: Vec<Node<H>>,
    /// Named slots; only component blocks have any.
    pub slots: BTreeMap<String, Vec<Node<H>>>,
}

pub type OverrideFn<H> = Box<dyn Fn(OverrideArgs<H>) -> anyhow::Result<H> + Send + Sync>;

/// Map from tag name to override function.
///
/// ```
/// use markdown_weave_render::{Overrides, OverrideArgs};
///
/// let overrides: Overrides<String> = Overrides::new()
///     .with("Greeting", |args: OverrideArgs<String>| {
///         Ok(format!("hello {}", args.props["name"].as_str().unwrap_or("?")))
///     });
/// assert!(overrides.contains("Greeting"));
/// ```
pub struct Overrides<H> {
    map: HashMap<String, OverrideFn<H>>,
}

impl<H> Overrides<H> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Builder form of [`Overrides::insert`].
    pub fn with<F>(mut self, tag: impl Into<String>, f: F) -> Self
    where
        F: Fn(OverrideArgs<H>) -> anyhow::Result<H> + Send + Sync + 'static,
    {
        self.insert(tag, f);
        self
    }

    /// Register `f` for `tag`, replacing any previous override.
    pub fn insert<F>(&mut self, tag: impl Into<String>, f: F)
    where
        F: Fn(OverrideArgs<H>) -> anyhow::Result<H> + Send + Sync + 'static,
    {
        self.map.insert(tag.into(), Box::new(f));
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.map.remove(tag).is_some()
    }

    pub fn get(&self, tag: &str) -> Option<&OverrideFn<H>> {
        self.map.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<H> Default for Overrides<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Overrides<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.map.keys().collect();
        tags.sort();
        f.debug_struct("Overrides").field("tags", &tags).finish()
    }
}
