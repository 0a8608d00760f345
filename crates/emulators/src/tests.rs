use crate::{ElementLocator, EmulatorSettings, GalleryApp, Role, ToolbarLayout};
use gallery_pilot_core::platform::PointerSettings;
use gallery_pilot_core::provider::{ProviderDescriptor, ProviderError, UiTree};
use gallery_pilot_core::types::Point;
use gallery_pilot_core::ui::{
    DuplicatePolicy, ElementQuery, QueryResult, UiElement, attribute_names,
};
use gallery_pilot_platform_mock::{MockPointerDevice, dyn_pointer_device, pointer_device};
use gallery_pilot_provider_mock::fixtures::{self, ToolbarGeneration, ids};
use gallery_pilot_provider_mock::{MockTree, TreeChange};
use gallery_pilot_runtime::Session;
use gallery_pilot_runtime::test_support::{CountingSleeper, mock_session};
use rstest::rstest;
use serial_test::serial;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Tree wrapper that counts executed queries.
struct CountingTree {
    inner: Arc<MockTree>,
    queries: AtomicUsize,
}

impl CountingTree {
    fn new(inner: Arc<MockTree>) -> Arc<Self> {
        Arc::new(Self { inner, queries: AtomicUsize::new(0) })
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl UiTree for CountingTree {
    fn descriptor(&self) -> &ProviderDescriptor {
        self.inner.descriptor()
    }

    fn root(&self) -> Result<Arc<dyn UiElement>, ProviderError> {
        self.inner.root()
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.inner.duplicate_policy()
    }

    fn execute(
        &self,
        scope: Option<&Arc<dyn UiElement>>,
        query: &ElementQuery,
    ) -> Result<QueryResult, ProviderError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(scope, query)
    }
}

fn counting_session(
    tree: &Arc<MockTree>,
    sleeper: &CountingSleeper,
) -> (Session, Arc<CountingTree>, Arc<MockPointerDevice>) {
    let counting = CountingTree::new(Arc::clone(tree));
    let pointer = pointer_device();
    let session =
        Session::new(Arc::clone(&counting) as Arc<dyn UiTree>, dyn_pointer_device(&pointer))
            .with_pointer_settings(PointerSettings::immediate())
            .with_sleeper(sleeper.sleeper());
    (session, counting, pointer)
}

#[rstest]
fn retrying_lookup_gives_up_after_one_retry() {
    let tree = Arc::new(fixtures::gallery_tree(ToolbarGeneration::Loader));
    let sleeper = CountingSleeper::new();
    let (session, counting, _pointer) = counting_session(&tree, &sleeper);
    let gallery = GalleryApp::new(&session);

    assert!(gallery.delete_dialog().unwrap().is_none());
    assert_eq!(counting.queries(), 2);
    assert_eq!(sleeper.calls(), vec![Duration::from_secs(1)]);
}

#[rstest]
fn retrying_lookup_finds_element_created_during_the_delay() {
    let tree = Arc::new(fixtures::gallery_tree(ToolbarGeneration::Loader));
    let writer = Arc::clone(&tree);
    let sleeper = CountingSleeper::with_hook(move |delay| {
        assert_eq!(delay, Duration::from_secs(1));
        writer.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
    });
    let (session, counting, _pointer) = counting_session(&tree, &sleeper);
    let gallery = GalleryApp::new(&session);

    let dialog = gallery.delete_dialog().unwrap().unwrap();
    assert_eq!(dialog.runtime_id().as_str(), ids::DELETE_DIALOG);
    assert_eq!(counting.queries(), 2);
    assert_eq!(sleeper.count(), 1);
}

#[rstest]
fn retrying_lookup_does_not_sleep_when_present() {
    let tree = Arc::new(fixtures::gallery_tree(ToolbarGeneration::Loader));
    tree.attach(ids::VIEW, &fixtures::photo_viewer()).unwrap();
    let sleeper = CountingSleeper::new();
    let (session, counting, _pointer) = counting_session(&tree, &sleeper);

    let viewer = GalleryApp::new(&session).photo_viewer().unwrap().unwrap();
    assert_eq!(viewer.runtime_id().as_str(), ids::PHOTO_VIEWER);
    assert_eq!(counting.queries(), 1);
    assert_eq!(sleeper.count(), 0);
}

#[rstest]
#[serial]
fn retrying_lookup_waits_on_the_wall_clock() {
    let (session, tree, _pointer) = mock_session(ToolbarGeneration::Direct);
    let settings = EmulatorSettings::default().with_retry_delay(Duration::from_millis(200));
    let gallery = GalleryApp::with_settings(&session, settings);
    let _scheduled = tree.schedule(vec![(
        Duration::from_millis(100),
        TreeChange::attach(ids::VIEW, fixtures::photo_viewer()),
    )]);

    let started = Instant::now();
    let viewer = gallery.photo_viewer().unwrap();
    assert!(viewer.is_some());
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[rstest]
fn delete_dialog_actions_click_the_visible_buttons() {
    let (session, tree, pointer) = mock_session(ToolbarGeneration::Loader);
    tree.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
    let gallery = GalleryApp::new(&session);

    assert_eq!(
        gallery.delete_dialog_delete_button().unwrap().runtime_id().as_str(),
        ids::DELETE_DIALOG_YES
    );
    gallery.confirm_delete().unwrap();
    gallery.cancel_delete().unwrap();
    assert_eq!(pointer.click_points(), vec![Point::new(210.0, 740.0), Point::new(510.0, 740.0)]);
}

#[rstest]
fn dismissed_dialog_is_absent_after_the_retry() {
    let (session, tree, pointer) = mock_session(ToolbarGeneration::Loader);
    tree.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
    let settings = EmulatorSettings::default().with_retry_delay(Duration::from_millis(20));
    let gallery = GalleryApp::with_settings(&session, settings);

    gallery.confirm_delete().unwrap();
    let scheduled =
        tree.schedule(vec![(Duration::from_millis(5), TreeChange::detach(ids::DELETE_DIALOG))]);
    scheduled.join();

    assert!(gallery.delete_dialog().unwrap().is_none());
    assert_eq!(pointer.click_points(), vec![Point::new(210.0, 740.0)]);
}

#[rstest]
fn hidden_dialog_buttons_are_not_clickable() {
    let (session, tree, pointer) = mock_session(ToolbarGeneration::Loader);
    tree.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
    tree.set_attribute(ids::DELETE_DIALOG_NO, attribute_names::VISIBLE, false).unwrap();

    assert!(GalleryApp::new(&session).cancel_delete().is_err());
    assert!(pointer.log().is_empty());
}

#[rstest]
#[case(ToolbarGeneration::Loader)]
#[case(ToolbarGeneration::Direct)]
fn toolbar_clicks_are_layout_independent(#[case] generation: ToolbarGeneration) {
    let (session, _tree, pointer) = mock_session(generation);
    let gallery = GalleryApp::new(&session);

    gallery.click_toolbar_button(2).unwrap();
    gallery.click_toolbar_cancel_icon().unwrap();
    assert_eq!(pointer.click_points(), vec![Point::new(670.0, 1230.0), Point::new(50.0, 1230.0)]);
}

#[rstest]
fn toolbar_exposes_its_parts() {
    let (session, _tree, _pointer) = mock_session(ToolbarGeneration::Direct);
    let toolbar = GalleryApp::new(&session).toolbar().unwrap();
    assert_eq!(toolbar.element().runtime_id().as_str(), ids::TOOLBAR);
    assert_eq!(toolbar.probe_layout().unwrap(), ToolbarLayout::OldLayout);
}

#[rstest]
fn gallery_accessors_resolve_the_main_screen() {
    let (session, _tree, _pointer) = mock_session(ToolbarGeneration::Loader);
    let gallery = GalleryApp::new(&session);

    assert_eq!(gallery.qml_view().unwrap().runtime_id().as_str(), ids::VIEW);
    assert_eq!(gallery.tabs_bar().unwrap().runtime_id().as_str(), ids::TABS_BAR);
    assert_eq!(gallery.albums_tab_button().unwrap().runtime_id().as_str(), ids::ALBUMS_TAB);
    assert_eq!(gallery.first_event().unwrap().runtime_id().as_str(), ids::FIRST_EVENT);
    assert_eq!(gallery.first_album().unwrap().runtime_id().as_str(), ids::FIRST_ALBUM);
    assert_eq!(
        gallery.first_image_in_event_view().unwrap().runtime_id().as_str(),
        ids::FIRST_EVENT_PHOTO
    );
    assert_eq!(
        gallery.photo_viewer_loader().unwrap().runtime_id().as_str(),
        ids::PHOTO_VIEWER_LOADER
    );
}

#[rstest]
fn album_editor_fields_and_actions() {
    let (session, _tree, pointer) = mock_session(ToolbarGeneration::Loader);
    let gallery = GalleryApp::new(&session);
    let editor = gallery.album_editor().unwrap().unwrap();

    assert_eq!(editor.panel().runtime_id().as_str(), ids::ALBUM_EDITOR_ANIMATED);
    assert_eq!(editor.editor().unwrap().runtime_id().as_str(), ids::ALBUM_EDITOR);
    assert_eq!(editor.title_field().unwrap().runtime_id().as_str(), ids::ALBUM_TITLE);
    assert_eq!(editor.subtitle_field().unwrap().runtime_id().as_str(), ids::ALBUM_SUBTITLE);
    editor.ensure_fully_open().unwrap();

    editor.click_title_field().unwrap();
    editor.click_subtitle_field().unwrap();
    editor.add_photos().unwrap();
    assert_eq!(
        pointer.click_points(),
        vec![Point::new(360.0, 130.0), Point::new(360.0, 195.0), Point::new(360.0, 510.0)]
    );
}

#[rstest]
fn album_editor_close_clicks_below_the_cover_and_waits() {
    let (session, tree, pointer) = mock_session(ToolbarGeneration::Loader);
    let gallery = GalleryApp::new(&session);
    let editor = gallery.album_editor().unwrap().unwrap();

    tree.set_attribute(ids::ALBUM_EDITOR_ANIMATED, attribute_names::ANIMATION_RUNNING, true)
        .unwrap();
    let scheduled = tree.schedule(vec![
        (
            Duration::from_millis(10),
            TreeChange::set(ids::ALBUM_EDITOR_ANIMATED, attribute_names::IS_OPEN, false),
        ),
        (
            Duration::from_millis(10),
            TreeChange::set(ids::ALBUM_EDITOR_ANIMATED, attribute_names::ANIMATION_RUNNING, false),
        ),
    ]);

    editor.close().unwrap();
    scheduled.join();
    assert_eq!(pointer.click_points(), vec![Point::new(360.0, 761.0)]);
}

#[rstest]
fn album_editor_is_absent_without_panel() {
    let (session, tree, _pointer) = mock_session(ToolbarGeneration::Loader);
    tree.detach(ids::ALBUM_EDITOR_ANIMATED).unwrap();
    let sleeper = CountingSleeper::new();
    let session = session.with_sleeper(sleeper.sleeper());

    assert!(GalleryApp::new(&session).album_editor().unwrap().is_none());
    assert_eq!(sleeper.count(), 1);
}

#[rstest]
fn click_role_uses_declared_lookup() {
    let (session, _tree, pointer) = mock_session(ToolbarGeneration::Direct);
    let gallery = GalleryApp::new(&session);
    gallery.driver().click_role(gallery.locator(), Role::FirstAlbum).unwrap();
    assert_eq!(pointer.click_points(), vec![Point::new(180.0, 260.0)]);
}

#[rstest]
fn locators_within_each_other_share_settings() {
    let (session, tree, _pointer) = mock_session(ToolbarGeneration::Loader);
    let settings = EmulatorSettings::default().with_retry_delay(Duration::from_millis(5));
    let locator = ElementLocator::with_settings(&session, settings.clone());
    let scoped = locator.within(tree.node(ids::ALBUM_EDITOR).unwrap());
    assert_eq!(scoped.settings(), &settings);
    assert!(scoped.scope().is_some());
}
