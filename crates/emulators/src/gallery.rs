use crate::album_editor::AlbumEditor;
use crate::driver::InteractionDriver;
use crate::error::EmulatorResult;
use crate::locator::ElementLocator;
use crate::roles::Role;
use crate::settings::EmulatorSettings;
use crate::toolbar::Toolbar;
use gallery_pilot_core::ui::UiElement;
use gallery_pilot_runtime::Session;
use std::sync::Arc;

/// Entry point for gallery tests: accessors for the main screen's elements and the
/// actions performed on them.
pub struct GalleryApp<'a> {
    locator: ElementLocator<'a>,
    driver: InteractionDriver<'a>,
}

impl<'a> GalleryApp<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self::with_settings(session, EmulatorSettings::default())
    }

    pub fn with_settings(session: &'a Session, settings: EmulatorSettings) -> Self {
        Self {
            locator: ElementLocator::with_settings(session, settings),
            driver: InteractionDriver::new(session),
        }
    }

    pub fn locator(&self) -> &ElementLocator<'a> {
        &self.locator
    }

    pub fn driver(&self) -> &InteractionDriver<'a> {
        &self.driver
    }

    pub fn qml_view(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::QmlView)
    }

    pub fn photo_viewer_loader(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::PhotoViewerLoader)
    }

    pub fn photo_viewer(&self) -> EmulatorResult<Option<Arc<dyn UiElement>>> {
        self.locator.resolve_single_retrying(Role::PhotoViewer)
    }

    pub fn tabs_bar(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::TabsBar)
    }

    pub fn albums_tab_button(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::AlbumsTabButton)
    }

    pub fn toolbar(&self) -> EmulatorResult<Toolbar<'a>> {
        self.locator.toolbar()
    }

    pub fn toolbar_button(&self, index: usize) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_toolbar_button(index)
    }

    pub fn toolbar_cancel_icon(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_toolbar_cancel_icon()
    }

    pub fn click_toolbar_button(&self, index: usize) -> EmulatorResult<()> {
        let button = self.toolbar_button(index)?;
        self.driver.click(button.as_ref())
    }

    pub fn click_toolbar_cancel_icon(&self) -> EmulatorResult<()> {
        let icon = self.toolbar_cancel_icon()?;
        self.driver.click(icon.as_ref())
    }

    pub fn delete_dialog(&self) -> EmulatorResult<Option<Arc<dyn UiElement>>> {
        self.locator.resolve_single_retrying(Role::DeleteDialog)
    }

    pub fn delete_dialog_delete_button(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::DeleteDialogConfirm)
    }

    pub fn delete_dialog_cancel_button(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::DeleteDialogCancel)
    }

    pub fn confirm_delete(&self) -> EmulatorResult<()> {
        self.driver.click_role(&self.locator, Role::DeleteDialogConfirm)
    }

    pub fn cancel_delete(&self) -> EmulatorResult<()> {
        self.driver.click_role(&self.locator, Role::DeleteDialogCancel)
    }

    pub fn first_event(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve_single(Role::FirstEvent)
    }

    pub fn first_image_in_event_view(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.first_photo_in_first_event()
    }

    pub fn first_album(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve(Role::FirstAlbum)
    }

    /// The album editor panel, if it exists (it is created the first time an album is
    /// opened for editing).
    pub fn album_editor(&self) -> EmulatorResult<Option<AlbumEditor<'a>>> {
        let panel = self.locator.resolve_single_retrying(Role::AlbumEditorAnimated)?;
        Ok(panel.map(|panel| AlbumEditor::new(&self.locator, panel)))
    }
}
