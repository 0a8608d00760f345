use crate::error::EmulatorResult;
use crate::locator::ElementLocator;
use crate::roles::Role;
use gallery_pilot_core::types::{Point, Rect};
use gallery_pilot_core::ui::{UiElement, UiValue, attribute_names};
use gallery_pilot_runtime::Session;
use tracing::debug;

/// Point one unit below the horizontal centre of `bounds`' bottom edge. Clicking there
/// closes sheet-like panels that dismiss on an outside tap.
pub fn closing_point(bounds: Rect) -> Point {
    Point::new(bounds.x() + bounds.width() / 2.0, bounds.y() + bounds.height() + 1.0)
}

/// Pointer gestures against resolved elements, plus the open/close wait protocol.
pub struct InteractionDriver<'a> {
    session: &'a Session,
}

impl<'a> InteractionDriver<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn move_to(&self, point: Point) -> EmulatorResult<Point> {
        Ok(self.session.pointer().move_to(point)?)
    }

    pub fn click_at(&self, point: Point) -> EmulatorResult<()> {
        Ok(self.session.pointer().click_at(point, None)?)
    }

    /// Clicks the centre of the element's hit region.
    pub fn click(&self, element: &dyn UiElement) -> EmulatorResult<()> {
        let bounds = element.bounds();
        debug!(element = %element.describe(), %bounds, "click element");
        Ok(self.session.pointer().click_rect(bounds, None)?)
    }

    pub fn click_role(&self, locator: &ElementLocator<'_>, role: Role) -> EmulatorResult<()> {
        let element = locator.resolve(role)?;
        self.click(element.as_ref())
    }

    /// Moves just below the element and clicks there.
    pub fn click_near_closing_point(&self, element: &dyn UiElement) -> EmulatorResult<()> {
        let target = closing_point(element.bounds());
        debug!(element = %element.describe(), %target, "click near closing point");
        let pointer = self.session.pointer();
        pointer.move_to(target)?;
        pointer.click(None)?;
        Ok(())
    }

    /// Waits until the opening animation has finished and the element reports open.
    pub fn wait_open(&self, element: &dyn UiElement) -> EmulatorResult<()> {
        debug!(element = %element.describe(), "waiting for open");
        element.wait_for(attribute_names::ANIMATION_RUNNING, &UiValue::Bool(false))?;
        element.wait_for(attribute_names::IS_OPEN, &UiValue::Bool(true))?;
        Ok(())
    }

    /// Waits until the element reports closed and its closing animation has finished.
    pub fn wait_closed(&self, element: &dyn UiElement) -> EmulatorResult<()> {
        debug!(element = %element.describe(), "waiting for close");
        element.wait_for(attribute_names::IS_OPEN, &UiValue::Bool(false))?;
        element.wait_for(attribute_names::ANIMATION_RUNNING, &UiValue::Bool(false))?;
        Ok(())
    }
}
