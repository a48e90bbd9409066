//! Heading identifiers.
//!
//! A heading's id is the slug of its text plus, on collision, a numeric
//! suffix. Uniqueness is tracked by a [`HeadingIds`] registry that the caller
//! owns: [`crate::transform`] uses a fresh one per call, while
//! [`crate::transform_with_ids`] lets a registry span several documents.
//!
//! A process-wide registry also exists for callers that want ids to keep
//! counting across separate transforms without threading state through
//! ([`crate::transform_continuing`]). It sits behind a mutex and is cleared
//! with [`reset_heading_ids`].

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, OnceLock, PoisonError};

/// Fallback slug for headings with no usable characters.
pub const EMPTY_SLUG: &str = "section";

static GLOBAL_IDS: OnceLock<Mutex<HeadingIds>> = OnceLock::new();

/// Turn heading text into a URL-safe slug.
///
/// Lowercases, turns whitespace into `-`, drops anything that is not a
/// letter, digit or hyphen (Unicode-aware), collapses hyphen runs and trims
/// hyphens from both ends.
///
/// ```
/// use markdown_weave_render::heading_ids::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Ünïcödé 42"), "ünïcödé-42");
/// assert_eq!(slugify("???"), "section");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_alphanumeric() {
            slug.push(c);
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Registry that hands out unique heading ids.
#[derive(Debug, Clone, Default)]
pub struct HeadingIds {
    /// Next suffix to try, per base slug.
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl HeadingIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique id for a heading with this text.
    pub fn next_id(&mut self, text: &str) -> String {
        self.unique(slugify(text))
    }

    /// Unique id built from an already-slugged base: `base`, then `base-1`,
    /// `base-2`... skipping any id handed out before.
    pub fn unique(&mut self, base: String) -> String {
        let next = self.counts.entry(base.clone()).or_insert(0);
        let mut id = if *next == 0 {
            base.clone()
        } else {
            format!("{base}-{next}")
        };
        while self.issued.contains(&id) {
            *next += 1;
            id = format!("{base}-{next}");
        }
        *next += 1;
        self.issued.insert(id.clone());
        id
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.issued.clear();
    }

    /// Number of ids issued since the last reset.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

/// Run `f` with the process-wide registry locked.
pub(crate) fn with_global_ids<R>(f: impl FnOnce(&mut HeadingIds) -> R) -> R {
    let lock = GLOBAL_IDS.get_or_init(|| Mutex::new(HeadingIds::new()));
    // The registry holds no invariants a panicking holder could break.
    let mut ids = lock.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut ids)
}

/// Clear the process-wide registry used by [`crate::transform_continuing`].
///
/// Call this between unrelated documents that should get identical ids.
pub fn reset_heading_ids() {
    with_global_ids(HeadingIds::reset);
    log::trace!("process-wide heading ids reset");
}
