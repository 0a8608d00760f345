use super::attributes::names;
use super::identifiers::RuntimeId;
use super::value::UiValue;
use crate::provider::ProviderError;
use crate::types::Rect;
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Interval used by the default [`UiElement::wait_for`] implementation.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to a node of the live UI tree.
///
/// Handles are borrowed views: the tree (and therefore the element's lifetime on screen) is
/// owned by the application under test. Attribute reads always reflect the current state.
pub trait UiElement: Send + Sync {
    fn runtime_id(&self) -> &RuntimeId;

    /// Toolkit type name, e.g. `QQuickLoader` or `AlbumEditor`.
    fn type_name(&self) -> &str;

    fn object_name(&self) -> &str;

    /// Reads a toolkit attribute by name. Returns `None` when the element does not expose it.
    fn attribute(&self, name: &str) -> Option<UiValue>;

    fn attribute_names(&self) -> Vec<String>;

    /// Direct children in document order.
    fn children(&self) -> Vec<Arc<dyn UiElement>>;

    /// Attribute lookup that also answers the intrinsic `objectName` and `visible` keys.
    fn property(&self, name: &str) -> Option<UiValue> {
        match name {
            names::OBJECT_NAME => Some(UiValue::from(self.object_name())),
            names::VISIBLE => Some(UiValue::from(self.is_visible())),
            _ => self.attribute(name),
        }
    }

    fn bounds(&self) -> Rect {
        self.attribute(names::GLOBAL_RECT).and_then(|value| value.as_rect()).unwrap_or_default()
    }

    fn is_visible(&self) -> bool {
        self.attribute(names::VISIBLE).and_then(|value| value.as_bool()).unwrap_or(true)
    }

    /// Blocks until the named property equals `expected`.
    ///
    /// There is no timeout; a property that never settles keeps the caller blocked.
    /// Providers with change notification should override the polling default.
    fn wait_for(&self, name: &str, expected: &UiValue) -> Result<(), ProviderError> {
        loop {
            if self.property(name).is_some_and(|value| value.matches(expected)) {
                return Ok(());
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    fn describe(&self) -> String {
        let object_name = self.object_name();
        if object_name.is_empty() {
            format!("{}#{}", self.type_name(), self.runtime_id())
        } else {
            format!("{}[{}]#{}", self.type_name(), object_name, self.runtime_id())
        }
    }
}

impl fmt::Debug for dyn UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
