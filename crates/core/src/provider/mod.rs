mod descriptor;
mod error;
mod tree;

pub use descriptor::ProviderDescriptor;
pub use error::{ProviderError, ProviderErrorKind};
pub use tree::UiTree;
