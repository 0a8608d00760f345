use gallery_pilot_core::provider::ProviderError;
use gallery_pilot_core::ui::{RuntimeId, UiElement, UiValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock, Weak};
use tracing::trace;

/// Live node of a [`crate::MockTree`].
///
/// Attribute writes bump a revision counter and wake every thread blocked in
/// [`UiElement::wait_for`], so waits settle without polling.
pub struct MockNode {
    runtime_id: RuntimeId,
    type_name: String,
    object_name: String,
    attributes: RwLock<BTreeMap<String, UiValue>>,
    children: RwLock<Vec<Arc<MockNode>>>,
    parent: RwLock<Weak<MockNode>>,
    revision: Mutex<u64>,
    changed: Condvar,
}

impl MockNode {
    pub fn new(
        runtime_id: impl Into<RuntimeId>,
        type_name: impl Into<String>,
        object_name: impl Into<String>,
        attributes: BTreeMap<String, UiValue>,
    ) -> Arc<Self> {
        Arc::new(Self {
            runtime_id: runtime_id.into(),
            type_name: type_name.into(),
            object_name: object_name.into(),
            attributes: RwLock::new(attributes),
            children: RwLock::new(Vec::new()),
            parent: RwLock::new(Weak::new()),
            revision: Mutex::new(0),
            changed: Condvar::new(),
        })
    }

    pub fn add_child(parent: &Arc<Self>, child: Arc<Self>) {
        *child.parent.write().unwrap_or_else(PoisonError::into_inner) = Arc::downgrade(parent);
        parent.children.write().unwrap_or_else(PoisonError::into_inner).push(child);
        parent.bump();
    }

    /// Detaches the direct child with the given id.
    pub fn remove_child(&self, runtime_id: &str) -> Option<Arc<Self>> {
        let removed = {
            let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
            let index = children.iter().position(|c| c.runtime_id.as_str() == runtime_id)?;
            children.remove(index)
        };
        *removed.parent.write().unwrap_or_else(PoisonError::into_inner) = Weak::new();
        self.bump();
        Some(removed)
    }

    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.read().unwrap_or_else(PoisonError::into_inner).upgrade()
    }

    pub fn child_nodes(&self) -> Vec<Arc<Self>> {
        self.children.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Depth-first search for a node (this one included) by runtime id.
    pub fn find(self: &Arc<Self>, runtime_id: &str) -> Option<Arc<Self>> {
        if self.runtime_id.as_str() == runtime_id {
            return Some(Arc::clone(self));
        }
        self.child_nodes().iter().find_map(|child| child.find(runtime_id))
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<UiValue>) {
        let name = name.into();
        let value = value.into();
        trace!(node = %self.runtime_id, attribute = %name, %value, "mock attribute updated");
        self.attributes.write().unwrap_or_else(PoisonError::into_inner).insert(name, value);
        self.bump();
    }

    pub fn revision(&self) -> u64 {
        *self.revision.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        let mut revision = self.revision.lock().unwrap_or_else(PoisonError::into_inner);
        *revision += 1;
        self.changed.notify_all();
    }
}

impl fmt::Debug for MockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockNode")
            .field("runtime_id", &self.runtime_id)
            .field("type_name", &self.type_name)
            .field("object_name", &self.object_name)
            .field("children", &self.children.read().unwrap_or_else(PoisonError::into_inner).len())
            .finish_non_exhaustive()
    }
}

impl UiElement for MockNode {
    fn runtime_id(&self) -> &RuntimeId {
        &self.runtime_id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn object_name(&self) -> &str {
        &self.object_name
    }

    fn attribute(&self, name: &str) -> Option<UiValue> {
        self.attributes.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect()
    }

    fn children(&self) -> Vec<Arc<dyn UiElement>> {
        self.child_nodes().into_iter().map(|child| child as Arc<dyn UiElement>).collect()
    }

    fn wait_for(&self, name: &str, expected: &UiValue) -> Result<(), ProviderError> {
        // The revision lock is held while checking so a concurrent write cannot slip
        // between the check and the wait.
        let mut revision = self.revision.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.property(name).is_some_and(|value| value.matches(expected)) {
                return Ok(());
            }
            revision = self.changed.wait(revision).unwrap_or_else(PoisonError::into_inner);
        }
    }
}
