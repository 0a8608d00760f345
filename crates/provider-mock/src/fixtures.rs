//! Gallery scene fixtures shared by the emulator, runtime and CLI tests.

use crate::tree::{MockTree, NodeSpec};
use gallery_pilot_core::types::Rect;

const LOADER_TOOLBAR_XML: &str = include_str!("../assets/gallery_loader_toolbar.xml");
const DIRECT_TOOLBAR_XML: &str = include_str!("../assets/gallery_direct_toolbar.xml");

/// Runtime ids used by the embedded gallery fixtures.
pub mod ids {
    pub const VIEW: &str = "view";
    pub const OVERVIEW: &str = "overview";
    pub const TABS_BAR: &str = "tabs-bar";
    pub const ALBUMS_TAB: &str = "albums-tab";
    pub const FIRST_EVENT: &str = "event-0";
    pub const FIRST_EVENT_PHOTO: &str = "event-0-photo-0-shape";
    pub const FIRST_ALBUM: &str = "album-0";
    pub const TOOLBAR: &str = "toolbar";
    pub const TOOLBAR_CANCEL: &str = "toolbar-cancel";
    pub const TOOLBAR_BUTTONS: [&str; 3] =
        ["toolbar-button-0", "toolbar-button-1", "toolbar-button-2"];
    pub const PHOTO_VIEWER_LOADER: &str = "photo-viewer-loader";
    pub const PHOTO_VIEWER: &str = "photo-viewer";
    pub const DELETE_DIALOG: &str = "delete-dialog";
    pub const DELETE_DIALOG_YES: &str = "delete-dialog-yes";
    pub const DELETE_DIALOG_NO: &str = "delete-dialog-no";
    pub const ALBUM_EDITOR_ANIMATED: &str = "album-editor-animated";
    pub const ALBUM_EDITOR: &str = "album-editor";
    pub const ALBUM_TITLE: &str = "album-title";
    pub const ALBUM_SUBTITLE: &str = "album-subtitle";
    pub const ALBUM_COVER: &str = "album-cover";
    pub const ALBUM_ADD_PHOTOS: &str = "album-add-photos";
}

/// The two toolbar generations the gallery has shipped with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolbarGeneration {
    /// Buttons wrapped in `QQuickLoader` items.
    Loader,
    /// Buttons placed directly in the row.
    Direct,
}

impl ToolbarGeneration {
    pub const ALL: [ToolbarGeneration; 2] = [ToolbarGeneration::Loader, ToolbarGeneration::Direct];

    pub fn xml(self) -> &'static str {
        match self {
            ToolbarGeneration::Loader => LOADER_TOOLBAR_XML,
            ToolbarGeneration::Direct => DIRECT_TOOLBAR_XML,
        }
    }
}

/// Builds the embedded gallery scene for the given toolbar generation.
pub fn gallery_tree(generation: ToolbarGeneration) -> MockTree {
    MockTree::from_xml(generation.xml()).expect("embedded gallery fixture is valid XML")
}

/// The delete dialog, which the gallery creates only after a delete action.
pub fn delete_dialog() -> NodeSpec {
    NodeSpec::new("DeleteDialog")
        .named("deleteDialog")
        .with_id(ids::DELETE_DIALOG)
        .with_bounds(Rect::new(60.0, 500.0, 600.0, 300.0))
        .with_child(
            NodeSpec::new("Button")
                .named("deleteDialogYes")
                .with_id(ids::DELETE_DIALOG_YES)
                .with_bounds(Rect::new(80.0, 700.0, 260.0, 80.0)),
        )
        .with_child(
            NodeSpec::new("Button")
                .named("deleteDialogNo")
                .with_id(ids::DELETE_DIALOG_NO)
                .with_bounds(Rect::new(380.0, 700.0, 260.0, 80.0)),
        )
}

/// The photo viewer, instantiated by its loader on demand.
pub fn photo_viewer() -> NodeSpec {
    NodeSpec::new("PhotoViewer")
        .named("photoViewer")
        .with_id(ids::PHOTO_VIEWER)
        .with_bounds(Rect::new(0.0, 0.0, 720.0, 1280.0))
}
