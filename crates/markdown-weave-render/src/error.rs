use thiserror::Error;

/// Failure while building a render tree.
///
/// Tokenizing, parsing and the default mappings never fail; the only source
/// of errors is a caller-supplied override.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("override for `{tag}` failed: {source}")]
    Override {
        tag: String,
        source: anyhow::Error,
    },
}

impl RenderError {
    /// The tag whose override failed.
    pub fn tag(&self) -> &str {
        match self {
            RenderError::Override { tag, .. } => tag,
        }
    }
}
