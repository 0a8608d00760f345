use std::sync::Arc;
use std::time::Duration;

use gallery_pilot_core::platform::{PlatformError, PointerButton, PointerDevice, PointerSettings};
use gallery_pilot_core::types::{Point, Rect};
use thiserror::Error;
use tracing::{debug, trace};

/// Shared sleep function. Everything that suspends the calling thread goes through it.
pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

/// Sleeper backed by [`std::thread::sleep`].
pub fn thread_sleeper() -> Sleeper {
    Arc::new(std::thread::sleep)
}

const ENSURE_MOVE_THRESHOLD: f64 = 2.0;
const ENSURE_MOVE_ATTEMPTS: usize = 3;
const ENSURE_MOVE_RETRY_DELAY: Duration = Duration::from_millis(5);

#[derive(Debug, Error)]
pub enum PointerError {
    #[error("pointer action failed: {0}")]
    Platform(#[from] PlatformError),
    #[error("pointer target {0} is not a finite coordinate")]
    InvalidTarget(Point),
    #[error("element bounds {0} are empty; nothing to click")]
    EmptyBounds(Rect),
    #[error("pointer could not reach target {expected} (actual {actual}, threshold {threshold})")]
    EnsureMove { expected: Point, actual: Point, threshold: f64 },
}

/// Turns move and click requests into device events with the configured settle delays.
pub struct PointerEngine {
    device: Arc<dyn PointerDevice>,
    settings: PointerSettings,
    sleep: Sleeper,
}

impl PointerEngine {
    pub fn new(device: Arc<dyn PointerDevice>, settings: PointerSettings, sleep: Sleeper) -> Self {
        Self { device, settings, sleep }
    }

    pub fn settings(&self) -> &PointerSettings {
        &self.settings
    }

    pub fn device(&self) -> Arc<dyn PointerDevice> {
        Arc::clone(&self.device)
    }

    pub fn default_button(&self) -> PointerButton {
        self.settings.default_button
    }

    pub fn position(&self) -> Result<Point, PointerError> {
        Ok(self.device.position()?)
    }

    pub fn move_to(&self, point: Point) -> Result<Point, PointerError> {
        if !point.x().is_finite() || !point.y().is_finite() {
            return Err(PointerError::InvalidTarget(point));
        }
        trace!(%point, "pointer move");
        self.device.move_to(point)?;
        self.sleep(self.settings.after_move_delay);
        self.ensure_position(point)?;
        Ok(point)
    }

    /// Presses and releases `button` (or the default button) at the current position.
    pub fn click(&self, button: Option<PointerButton>) -> Result<(), PointerError> {
        let button = button.unwrap_or_else(|| self.default_button());
        debug!(?button, "pointer click");
        self.device.press(button)?;
        self.sleep(self.settings.after_input_delay);
        self.sleep(self.settings.press_release_delay);
        self.device.release(button)?;
        self.sleep(self.settings.after_input_delay);
        self.sleep(self.settings.after_click_delay);
        Ok(())
    }

    pub fn click_at(
        &self,
        point: Point,
        button: Option<PointerButton>,
    ) -> Result<(), PointerError> {
        self.move_to(point)?;
        self.click(button)
    }

    /// Clicks the centre of `bounds`.
    pub fn click_rect(
        &self,
        bounds: Rect,
        button: Option<PointerButton>,
    ) -> Result<(), PointerError> {
        if bounds.is_empty() {
            return Err(PointerError::EmptyBounds(bounds));
        }
        self.click_at(bounds.center(), button)
    }

    fn ensure_position(&self, target: Point) -> Result<(), PointerError> {
        let mut actual = self.device.position()?;
        for _ in 0..ENSURE_MOVE_ATTEMPTS {
            if distance(actual, target) <= ENSURE_MOVE_THRESHOLD {
                return Ok(());
            }
            self.device.move_to(target)?;
            self.sleep(ENSURE_MOVE_RETRY_DELAY);
            actual = self.device.position()?;
        }
        if distance(actual, target) <= ENSURE_MOVE_THRESHOLD {
            return Ok(());
        }
        Err(PointerError::EnsureMove { expected: target, actual, threshold: ENSURE_MOVE_THRESHOLD })
    }

    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        (self.sleep)(duration);
    }
}

fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    (dx * dx + dy * dy).sqrt()
}
