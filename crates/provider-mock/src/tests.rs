use crate::fixtures::{self, ToolbarGeneration, ids};
use crate::tree::{APP_RUNTIME_ID, MockTree, MockTreeLoadError, NodeSpec, TreeChange};
use gallery_pilot_core::provider::{ProviderErrorKind, UiTree};
use gallery_pilot_core::types::Rect;
use gallery_pilot_core::ui::{
    DuplicatePolicy, ElementQuery, UiElement, UiValue, attribute_names,
};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

#[rstest]
#[case(ToolbarGeneration::Loader)]
#[case(ToolbarGeneration::Direct)]
fn embedded_fixtures_parse(#[case] generation: ToolbarGeneration) {
    let tree = fixtures::gallery_tree(generation);
    let root = tree.root().unwrap();
    assert_eq!(root.runtime_id().as_str(), APP_RUNTIME_ID);
    for id in ids::TOOLBAR_BUTTONS {
        assert!(tree.contains(id), "{id} missing from {generation:?} fixture");
    }
    assert!(!tree.contains(ids::DELETE_DIALOG));
}

#[rstest]
fn view_is_reachable_from_root() {
    let tree = fixtures::gallery_tree(ToolbarGeneration::Loader);
    let view = tree.execute(None, &ElementQuery::single("QQuickView")).unwrap().into_single();
    assert_eq!(view.unwrap().runtime_id().as_str(), ids::VIEW);
}

#[rstest]
fn xml_attributes_are_typed() {
    let tree = fixtures::gallery_tree(ToolbarGeneration::Direct);
    let tab = tree.node(ids::ALBUMS_TAB).unwrap();
    assert_eq!(tab.attribute(attribute_names::BUTTON_INDEX), Some(UiValue::Integer(0)));
    assert_eq!(tab.bounds(), Rect::new(0.0, 0.0, 360.0, 80.0));

    let editor = tree.node(ids::ALBUM_EDITOR_ANIMATED).unwrap();
    assert_eq!(editor.attribute(attribute_names::IS_OPEN), Some(UiValue::Bool(true)));
    assert_eq!(editor.attribute(attribute_names::ANIMATION_RUNNING), Some(UiValue::Bool(false)));

    let hidden = tree.node("album-add-photos-hidden").unwrap();
    assert!(!hidden.is_visible());
    assert_eq!(hidden.object_name(), "albumCoverAddPhotosImage");
}

#[rstest]
fn invalid_bounds_are_reported() {
    let xml = r#"<tree><node type="Button" bounds="1,2,3"/></tree>"#;
    let err = MockTree::from_xml(xml).err().unwrap();
    assert!(matches!(err, MockTreeLoadError::InvalidRect(value) if value == "1,2,3"));
}

#[rstest]
fn attach_and_detach_change_query_results() {
    let tree = fixtures::gallery_tree(ToolbarGeneration::Loader);
    let query = ElementQuery::optional("DeleteDialog").with_object_name("deleteDialog");
    assert!(tree.execute(None, &query).unwrap().into_optional().is_none());

    tree.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
    let dialog = tree.execute(None, &query).unwrap().into_optional().unwrap();
    assert_eq!(dialog.runtime_id().as_str(), ids::DELETE_DIALOG);

    let detached = tree.detach(ids::DELETE_DIALOG).unwrap();
    assert!(format!("{detached:?}").contains("deleteDialog"));
    assert!(tree.execute(None, &query).unwrap().into_optional().is_none());
}

#[rstest]
fn detaching_unknown_or_root_fails() {
    let tree = MockTree::new([NodeSpec::new("QQuickView").with_id("view")]);
    assert_eq!(tree.detach("missing").unwrap_err().kind, ProviderErrorKind::NotFound);
    assert_eq!(tree.detach(APP_RUNTIME_ID).unwrap_err().kind, ProviderErrorKind::InvalidArgument);
}

#[rstest]
fn duplicate_policy_is_configurable() {
    let nodes = || {
        [
            NodeSpec::new("Button").named("deleteDialogYes"),
            NodeSpec::new("Button").named("deleteDialogYes"),
        ]
    };
    let query = ElementQuery::single("Button").with_object_name("deleteDialogYes");

    let strict = MockTree::new(nodes());
    assert_eq!(strict.execute(None, &query).unwrap_err().kind, ProviderErrorKind::Ambiguous);

    let lenient = MockTree::new(nodes()).with_duplicate_policy(DuplicatePolicy::First);
    assert_eq!(lenient.execute(None, &query).unwrap().len(), 1);
}

#[rstest]
fn scheduled_changes_apply_in_order() {
    let tree = Arc::new(fixtures::gallery_tree(ToolbarGeneration::Loader));
    let scheduled = tree.schedule(vec![
        (Duration::from_millis(5), TreeChange::attach(ids::VIEW, fixtures::photo_viewer())),
        (
            Duration::from_millis(5),
            TreeChange::set(ids::PHOTO_VIEWER, attribute_names::VISIBLE, false),
        ),
    ]);
    scheduled.join();

    let viewer = tree.node(ids::PHOTO_VIEWER).unwrap();
    assert!(!viewer.is_visible());
}

#[rstest]
fn scheduled_wait_settles_across_threads() {
    let tree = Arc::new(fixtures::gallery_tree(ToolbarGeneration::Direct));
    let editor = tree.node(ids::ALBUM_EDITOR_ANIMATED).unwrap();
    let _scheduled = tree.schedule(vec![(
        Duration::from_millis(10),
        TreeChange::set(ids::ALBUM_EDITOR_ANIMATED, attribute_names::IS_OPEN, false),
    )]);

    editor.wait_for(attribute_names::IS_OPEN, &UiValue::Bool(false)).unwrap();
}

#[rstest]
fn generated_ids_are_unique() {
    let tree = MockTree::new([NodeSpec::new("QQuickItem"), NodeSpec::new("QQuickItem")]);
    let items = tree.execute(None, &ElementQuery::many("QQuickItem")).unwrap().into_many();
    assert_eq!(items.len(), 2);
    assert_ne!(items[0].runtime_id(), items[1].runtime_id());
}
