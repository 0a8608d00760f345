use super::{ProviderDescriptor, ProviderError};
use crate::ui::{DuplicatePolicy, ElementQuery, QueryResult, UiElement, evaluate};
use std::sync::Arc;

/// Query-execution interface over a live UI tree.
pub trait UiTree: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Top-level element of the application under test.
    fn root(&self) -> Result<Arc<dyn UiElement>, ProviderError>;

    fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::Reject
    }

    /// Runs `query` relative to `scope`, or relative to [`UiTree::root`] when no scope is given.
    fn execute(
        &self,
        scope: Option<&Arc<dyn UiElement>>,
        query: &ElementQuery,
    ) -> Result<QueryResult, ProviderError> {
        match scope {
            Some(scope) => evaluate(scope, query, self.duplicate_policy()),
            None => evaluate(&self.root()?, query, self.duplicate_policy()),
        }
    }
}
