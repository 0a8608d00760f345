use std::error::Error;
use std::fmt::{Display, Formatter};

/// General error reported by UI tree providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}

/// Categorises provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// A single-valued query matched nothing.
    NotFound,
    /// A single-valued query matched more than one element.
    Ambiguous,
    /// The caller named a node that cannot take part in the operation, e.g. detaching the root.
    InvalidArgument,
}
