use crate::driver::InteractionDriver;
use crate::error::EmulatorResult;
use crate::locator::ElementLocator;
use crate::roles::Role;
use gallery_pilot_core::ui::UiElement;
use std::sync::Arc;
use tracing::info;

/// Emulator for the animated album editor panel. All lookups are scoped to the panel.
pub struct AlbumEditor<'a> {
    panel: Arc<dyn UiElement>,
    locator: ElementLocator<'a>,
    driver: InteractionDriver<'a>,
}

impl<'a> AlbumEditor<'a> {
    pub fn new(parent: &ElementLocator<'a>, panel: Arc<dyn UiElement>) -> Self {
        let locator = parent.within(Arc::clone(&panel));
        let driver = InteractionDriver::new(parent.session());
        Self { panel, locator, driver }
    }

    pub fn panel(&self) -> &Arc<dyn UiElement> {
        &self.panel
    }

    pub fn editor(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve(Role::AlbumEditor)
    }

    pub fn title_field(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve(Role::AlbumTitleField)
    }

    pub fn subtitle_field(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve(Role::AlbumSubtitleField)
    }

    pub fn cover_image(&self) -> EmulatorResult<Arc<dyn UiElement>> {
        self.locator.resolve(Role::AlbumCoverImage)
    }

    pub fn click_title_field(&self) -> EmulatorResult<()> {
        self.driver.click_role(&self.locator, Role::AlbumTitleField)
    }

    pub fn click_subtitle_field(&self) -> EmulatorResult<()> {
        self.driver.click_role(&self.locator, Role::AlbumSubtitleField)
    }

    /// Clicks the visible "add photos" icon on the cover.
    pub fn add_photos(&self) -> EmulatorResult<()> {
        self.driver.click_role(&self.locator, Role::AddPhotosIcon)
    }

    pub fn ensure_fully_open(&self) -> EmulatorResult<()> {
        self.driver.wait_open(self.panel.as_ref())
    }

    pub fn ensure_fully_closed(&self) -> EmulatorResult<()> {
        self.driver.wait_closed(self.panel.as_ref())
    }

    /// Taps just below the cover image and waits until the panel has closed.
    pub fn close(&self) -> EmulatorResult<()> {
        let cover = self.cover_image()?;
        self.driver.click_near_closing_point(cover.as_ref())?;
        self.ensure_fully_closed()?;
        info!(panel = %self.panel.describe(), "album editor closed");
        Ok(())
    }
}
