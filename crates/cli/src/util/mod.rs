use anyhow::Context;
use gallery_pilot_core::platform::PointerSettings;
use gallery_pilot_core::provider::UiTree;
use gallery_pilot_core::types::Rect;
use gallery_pilot_core::ui::UiElement;
use gallery_pilot_emulators::{EmulatorSettings, Role};
use gallery_pilot_platform_mock::{MockPointerDevice, dyn_pointer_device, pointer_device};
use gallery_pilot_provider_mock::MockTree;
use gallery_pilot_provider_mock::fixtures::{ToolbarGeneration, gallery_tree};
use gallery_pilot_runtime::Session;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub type CliResult<T> = Result<T, Box<dyn Error>>;

/// Everything a command needs: the session plus direct handles to the mock tree and pointer.
pub struct CliContext {
    pub session: Session,
    pub tree: Arc<MockTree>,
    pub pointer: Arc<MockPointerDevice>,
    pub settings: EmulatorSettings,
}

impl CliContext {
    pub fn new(tree: MockTree, settings: EmulatorSettings) -> Self {
        let tree = Arc::new(tree);
        let pointer = pointer_device();
        let session =
            Session::new(Arc::clone(&tree) as Arc<dyn UiTree>, dyn_pointer_device(&pointer))
                .with_pointer_settings(PointerSettings::immediate());
        Self { session, tree, pointer, settings }
    }
}

/// Loads the UI tree from an XML file, or the embedded fixture for `generation`.
pub fn load_tree(path: Option<&Path>, generation: ToolbarGeneration) -> CliResult<MockTree> {
    let Some(path) = path else {
        info!(?generation, "using embedded gallery fixture");
        return Ok(gallery_tree(generation));
    };
    let xml = fs::read_to_string(path)
        .with_context(|| format!("failed to read tree file {}", path.display()))?;
    let tree = MockTree::from_xml(&xml)
        .with_context(|| format!("failed to load tree file {}", path.display()))?;
    info!(path = %path.display(), "loaded tree file");
    Ok(tree)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ElementSummary {
    pub runtime_id: String,
    pub type_name: String,
    pub object_name: String,
    pub bounds: Rect,
    pub visible: bool,
}

impl ElementSummary {
    pub fn from_element(element: &dyn UiElement) -> Self {
        Self {
            runtime_id: element.runtime_id().as_str().to_owned(),
            type_name: element.type_name().to_owned(),
            object_name: element.object_name().to_owned(),
            bounds: element.bounds(),
            visible: element.is_visible(),
        }
    }

    pub fn label(&self) -> String {
        if self.object_name.is_empty() {
            self.type_name.clone()
        } else {
            format!("{} \"{}\"", self.type_name, self.object_name)
        }
    }
}

pub fn parse_millis(value: &str) -> Result<Duration, String> {
    let millis: u64 = value.parse().map_err(|err| format!("invalid duration '{value}': {err}"))?;
    Ok(Duration::from_millis(millis))
}

pub fn parse_role_arg(value: &str) -> Result<Role, String> {
    value.parse::<Role>().map_err(|err| {
        let known: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
        format!("{err}; known roles: {}", known.join(", "))
    })
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
