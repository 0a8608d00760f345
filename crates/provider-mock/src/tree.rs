use crate::node::MockNode;
use gallery_pilot_core::provider::{ProviderDescriptor, ProviderError, ProviderErrorKind, UiTree};
use gallery_pilot_core::types::Rect;
use gallery_pilot_core::ui::{DuplicatePolicy, UiElement, UiValue, attribute_names};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

pub const PROVIDER_ID: &str = "mock";
pub const APP_RUNTIME_ID: &str = "mock://app";

static DESCRIPTOR: ProviderDescriptor =
    ProviderDescriptor::new(PROVIDER_ID, "Mock Gallery Tree", "Qt/QML (mock)");

static GENERATED_IDS: AtomicU64 = AtomicU64::new(0);

/// Declarative description of a mock node and its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    type_name: String,
    object_name: String,
    runtime_id: Option<String>,
    attributes: BTreeMap<String, UiValue>,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            object_name: String::new(),
            runtime_id: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = object_name.into();
        self
    }

    pub fn with_id(mut self, runtime_id: impl Into<String>) -> Self {
        self.runtime_id = Some(runtime_id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<UiValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.with_attribute(attribute_names::GLOBAL_RECT, bounds)
    }

    pub fn visible(self, visible: bool) -> Self {
        self.with_attribute(attribute_names::VISIBLE, visible)
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = NodeSpec>,
    {
        self.children.extend(children);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn runtime_id(&self) -> Option<&str> {
        self.runtime_id.as_deref()
    }

    pub fn children(&self) -> &[NodeSpec] {
        &self.children
    }

    fn instantiate(&self) -> Arc<MockNode> {
        let runtime_id = self.runtime_id.clone().unwrap_or_else(|| {
            format!("mock://node/{}", GENERATED_IDS.fetch_add(1, Ordering::Relaxed))
        });
        let mut attributes = self.attributes.clone();
        attributes
            .entry(attribute_names::OBJECT_NAME.to_owned())
            .or_insert_with(|| UiValue::from(self.object_name.clone()));
        attributes.entry(attribute_names::VISIBLE.to_owned()).or_insert(UiValue::Bool(true));

        let node =
            MockNode::new(runtime_id, self.type_name.clone(), self.object_name.clone(), attributes);
        for child in &self.children {
            MockNode::add_child(&node, child.instantiate());
        }
        node
    }
}

/// A change applied to a live [`MockTree`], used to emulate lazily created dialogs and
/// animated transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeChange {
    SetAttribute { runtime_id: String, name: String, value: UiValue },
    Attach { parent: String, spec: NodeSpec },
    Detach { runtime_id: String },
}

impl TreeChange {
    pub fn set(runtime_id: &str, name: &str, value: impl Into<UiValue>) -> Self {
        TreeChange::SetAttribute {
            runtime_id: runtime_id.to_owned(),
            name: name.to_owned(),
            value: value.into(),
        }
    }

    pub fn attach(parent: &str, spec: NodeSpec) -> Self {
        TreeChange::Attach { parent: parent.to_owned(), spec }
    }

    pub fn detach(runtime_id: &str) -> Self {
        TreeChange::Detach { runtime_id: runtime_id.to_owned() }
    }
}

/// Live in-memory UI tree.
///
/// All nodes hang below a synthetic application node ([`APP_RUNTIME_ID`]), so every fixture
/// node (the `QQuickView` included) is reachable by descendant queries from the root.
pub struct MockTree {
    root: Arc<MockNode>,
    duplicates: DuplicatePolicy,
}

impl MockTree {
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeSpec>,
    {
        let root = NodeSpec::new("GalleryApplication").with_id(APP_RUNTIME_ID).with_children(nodes);
        Self { root: root.instantiate(), duplicates: DuplicatePolicy::Reject }
    }

    pub fn from_xml(xml: &str) -> Result<Self, MockTreeLoadError> {
        let parsed: XmlTree = from_str(xml)?;
        let nodes = parsed.nodes.into_iter().map(build_node).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(nodes))
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn root_node(&self) -> Arc<MockNode> {
        Arc::clone(&self.root)
    }

    pub fn node(&self, runtime_id: &str) -> Option<Arc<MockNode>> {
        self.root.find(runtime_id)
    }

    pub fn contains(&self, runtime_id: &str) -> bool {
        self.node(runtime_id).is_some()
    }

    pub fn set_attribute(
        &self,
        runtime_id: &str,
        name: &str,
        value: impl Into<UiValue>,
    ) -> Result<(), ProviderError> {
        self.require(runtime_id)?.set_attribute(name, value);
        Ok(())
    }

    pub fn attach(&self, parent: &str, spec: &NodeSpec) -> Result<Arc<MockNode>, ProviderError> {
        let parent = self.require(parent)?;
        let node = spec.instantiate();
        MockNode::add_child(&parent, Arc::clone(&node));
        debug!(parent = %parent.runtime_id(), node = %node.describe(), "mock node attached");
        Ok(node)
    }

    pub fn detach(&self, runtime_id: &str) -> Result<Arc<MockNode>, ProviderError> {
        let node = self.require(runtime_id)?;
        let parent = node.parent().ok_or_else(|| {
            ProviderError::new(
                ProviderErrorKind::InvalidArgument,
                "the application root cannot be detached",
            )
        })?;
        let removed = parent.remove_child(runtime_id).ok_or_else(|| not_found(runtime_id))?;
        debug!(node = %removed.describe(), "mock node detached");
        Ok(removed)
    }

    pub fn apply(&self, change: &TreeChange) -> Result<(), ProviderError> {
        match change {
            TreeChange::SetAttribute { runtime_id, name, value } => {
                self.set_attribute(runtime_id, name, value.clone())
            }
            TreeChange::Attach { parent, spec } => self.attach(parent, spec).map(|_| ()),
            TreeChange::Detach { runtime_id } => self.detach(runtime_id).map(|_| ()),
        }
    }

    /// Applies `steps` from a helper thread; each delay is relative to the previous step.
    pub fn schedule(self: &Arc<Self>, steps: Vec<(Duration, TreeChange)>) -> ScheduledChanges {
        let tree = Arc::clone(self);
        let handle = thread::spawn(move || {
            for (delay, change) in steps {
                thread::sleep(delay);
                if let Err(err) = tree.apply(&change) {
                    warn!(%err, ?change, "scheduled mock tree change failed");
                }
            }
        });
        ScheduledChanges { handle: Some(handle) }
    }

    fn require(&self, runtime_id: &str) -> Result<Arc<MockNode>, ProviderError> {
        self.node(runtime_id).ok_or_else(|| not_found(runtime_id))
    }
}

impl UiTree for MockTree {
    fn descriptor(&self) -> &ProviderDescriptor {
        &DESCRIPTOR
    }

    fn root(&self) -> Result<Arc<dyn UiElement>, ProviderError> {
        Ok(self.root_node() as Arc<dyn UiElement>)
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }
}

fn not_found(runtime_id: &str) -> ProviderError {
    ProviderError::new(ProviderErrorKind::NotFound, format!("no mock node with id '{runtime_id}'"))
}

/// Handle to changes scheduled with [`MockTree::schedule`]. Dropping it waits for the
/// remaining steps.
pub struct ScheduledChanges {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledChanges {
    pub fn join(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("mock tree scheduler thread panicked");
        }
    }
}

impl Drop for ScheduledChanges {
    fn drop(&mut self) {
        self.finish();
    }
}

#[derive(Debug, Deserialize)]
struct XmlTree {
    #[serde(rename = "node", default)]
    nodes: Vec<XmlNode>,
}

#[derive(Debug, Deserialize)]
struct XmlNode {
    #[serde(rename = "@type")]
    type_name: String,
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@id")]
    runtime_id: Option<String>,
    #[serde(rename = "@bounds")]
    bounds: Option<String>,
    #[serde(rename = "@visible")]
    visible: Option<bool>,
    #[serde(rename = "attribute", default)]
    attributes: Vec<XmlAttribute>,
    #[serde(rename = "node", default)]
    children: Vec<XmlNode>,
}

#[derive(Debug, Deserialize)]
struct XmlAttribute {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: String,
}

fn build_node(node: XmlNode) -> Result<NodeSpec, MockTreeLoadError> {
    if node.type_name.trim().is_empty() {
        return Err(MockTreeLoadError::MissingType);
    }

    let mut spec = NodeSpec::new(node.type_name);
    if let Some(name) = node.name {
        spec = spec.named(name);
    }
    if let Some(id) = node.runtime_id {
        spec = spec.with_id(id);
    }
    if let Some(bounds) = node.bounds.as_deref() {
        spec = spec.with_bounds(parse_rect(bounds)?);
    }
    spec = spec.visible(node.visible.unwrap_or(true));

    for attr in node.attributes {
        spec = spec.with_attribute(attr.name, parse_attribute_value(&attr.value));
    }
    for child in node.children {
        spec = spec.with_child(build_node(child)?);
    }
    Ok(spec)
}

fn parse_rect(value: &str) -> Result<Rect, MockTreeLoadError> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|chunk| chunk.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| MockTreeLoadError::InvalidRect(value.to_owned()))?;
    if parts.len() != 4 {
        return Err(MockTreeLoadError::InvalidRect(value.to_owned()));
    }
    Ok(Rect::new(parts[0], parts[1], parts[2], parts[3]))
}

fn parse_attribute_value(value: &str) -> UiValue {
    if let Ok(boolean) = value.parse::<bool>() {
        return UiValue::from(boolean);
    }
    if let Ok(integer) = value.parse::<i64>() {
        return UiValue::from(integer);
    }
    if let Ok(number) = value.parse::<f64>() {
        return UiValue::from(number);
    }
    UiValue::from(value.to_owned())
}

#[derive(Debug)]
pub enum MockTreeLoadError {
    Xml(quick_xml::DeError),
    MissingType,
    InvalidRect(String),
}

impl fmt::Display for MockTreeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockTreeLoadError::Xml(err) => write!(f, "failed to parse mock tree XML: {err}"),
            MockTreeLoadError::MissingType => write!(f, "mock tree node without a type"),
            MockTreeLoadError::InvalidRect(value) => {
                write!(f, "invalid bounds '{value}' (expected x,y,width,height)")
            }
        }
    }
}

impl std::error::Error for MockTreeLoadError {}

impl From<quick_xml::DeError> for MockTreeLoadError {
    fn from(err: quick_xml::DeError) -> Self {
        MockTreeLoadError::Xml(err)
    }
}
