//! Deterministic mock UI tree for testing the gallery emulators.
//!
//! Trees are loaded from XML (see `assets/`) or built from [`NodeSpec`]s, stay live while
//! tests run, and can be mutated directly or through scheduled [`TreeChange`]s.

pub mod fixtures;
mod node;
mod tree;

pub use fixtures::{ToolbarGeneration, gallery_tree};
pub use node::MockNode;
pub use tree::{
    APP_RUNTIME_ID, MockTree, MockTreeLoadError, NodeSpec, PROVIDER_ID, ScheduledChanges,
    TreeChange,
};

#[cfg(test)]
mod tests;
