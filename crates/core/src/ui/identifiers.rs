use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Stable identity of a node within one UI tree.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeId(Arc<str>);

impl RuntimeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuntimeId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for RuntimeId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Display for RuntimeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
