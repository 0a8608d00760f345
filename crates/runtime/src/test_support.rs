use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::Session;
use crate::pointer::Sleeper;
use gallery_pilot_core::platform::PointerSettings;
use gallery_pilot_core::provider::UiTree;
use gallery_pilot_platform_mock::{MockPointerDevice, dyn_pointer_device, pointer_device};
use gallery_pilot_provider_mock::MockTree;
use gallery_pilot_provider_mock::fixtures::{ToolbarGeneration, gallery_tree};

/// Session over the embedded gallery fixture with a recording pointer and no input delays.
/// The tree and pointer are returned alongside so tests can mutate and inspect them.
pub fn mock_session(
    generation: ToolbarGeneration,
) -> (Session, Arc<MockTree>, Arc<MockPointerDevice>) {
    session_for_tree(Arc::new(gallery_tree(generation)))
}

/// Same as [`mock_session`] for a caller-built tree.
pub fn session_for_tree(tree: Arc<MockTree>) -> (Session, Arc<MockTree>, Arc<MockPointerDevice>) {
    let pointer = pointer_device();
    let session = Session::new(Arc::clone(&tree) as Arc<dyn UiTree>, dyn_pointer_device(&pointer))
        .with_pointer_settings(PointerSettings::immediate());
    (session, tree, pointer)
}

type SleepHook = Box<dyn Fn(Duration) + Send + Sync>;

/// Sleeper that records every requested duration instead of blocking, optionally running a
/// hook in place of the sleep.
#[derive(Clone)]
pub struct CountingSleeper {
    calls: Arc<Mutex<Vec<Duration>>>,
    hook: Arc<Option<SleepHook>>,
}

impl CountingSleeper {
    pub fn new() -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())), hook: Arc::new(None) }
    }

    /// Runs `hook` whenever the sleeper is called, e.g. to let a tree change land "during"
    /// the sleep.
    pub fn with_hook(hook: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())), hook: Arc::new(Some(Box::new(hook))) }
    }

    pub fn sleeper(&self) -> Sleeper {
        let this = self.clone();
        Arc::new(move |duration| {
            this.calls.lock().unwrap_or_else(PoisonError::into_inner).push(duration);
            if let Some(hook) = this.hook.as_ref() {
                hook(duration);
            }
        })
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for CountingSleeper {
    fn default() -> Self {
        Self::new()
    }
}
