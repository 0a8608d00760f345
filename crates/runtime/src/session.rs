use std::sync::Arc;
use std::time::Duration;

use gallery_pilot_core::platform::{PointerDevice, PointerSettings};
use gallery_pilot_core::provider::{ProviderError, UiTree};
use gallery_pilot_core::ui::{ElementQuery, QueryResult, UiElement};
use tracing::{debug, trace};

use crate::pointer::{PointerEngine, Sleeper, thread_sleeper};

/// Explicit context handle shared by all emulator operations: the UI tree to query, the
/// pointer to drive and the sleeper used for every suspension.
pub struct Session {
    tree: Arc<dyn UiTree>,
    pointer: PointerEngine,
    sleeper: Sleeper,
}

impl Session {
    pub fn new(tree: Arc<dyn UiTree>, device: Arc<dyn PointerDevice>) -> Self {
        let sleeper = thread_sleeper();
        let pointer = PointerEngine::new(device, PointerSettings::default(), Arc::clone(&sleeper));
        Self { tree, pointer, sleeper }
    }

    pub fn with_pointer_settings(mut self, settings: PointerSettings) -> Self {
        self.pointer =
            PointerEngine::new(self.pointer.device(), settings, Arc::clone(&self.sleeper));
        self
    }

    /// Replaces the sleeper for both the session and its pointer engine.
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.pointer = PointerEngine::new(
            self.pointer.device(),
            self.pointer.settings().clone(),
            Arc::clone(&sleeper),
        );
        self.sleeper = sleeper;
        self
    }

    pub fn tree(&self) -> &Arc<dyn UiTree> {
        &self.tree
    }

    pub fn pointer(&self) -> &PointerEngine {
        &self.pointer
    }

    pub fn root(&self) -> Result<Arc<dyn UiElement>, ProviderError> {
        self.tree.root()
    }

    /// Runs `query` below `scope`, or below the tree root.
    pub fn execute(
        &self,
        scope: Option<&Arc<dyn UiElement>>,
        query: &ElementQuery,
    ) -> Result<QueryResult, ProviderError> {
        let result = self.tree.execute(scope, query);
        match &result {
            Ok(found) => trace!(%query, matches = found.len(), "query executed"),
            Err(err) => debug!(%query, %err, "query failed"),
        }
        result
    }

    pub fn sleep(&self, duration: Duration) {
        debug!(?duration, "session sleeping");
        (self.sleeper)(duration);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.tree.descriptor().id)
            .field("pointer", self.pointer.settings())
            .finish()
    }
}
