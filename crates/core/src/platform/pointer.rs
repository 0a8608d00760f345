use crate::platform::PlatformError;
use crate::types::Point;
use std::time::Duration;

/// Mouse or touch pointer buttons. Touch input maps to [`PointerButton::Left`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Timing applied around simulated pointer input.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerSettings {
    pub default_button: PointerButton,
    pub after_move_delay: Duration,
    pub press_release_delay: Duration,
    pub after_input_delay: Duration,
    pub after_click_delay: Duration,
}

impl PointerSettings {
    /// Settings without any delays, for mock devices and unit tests.
    pub fn immediate() -> Self {
        Self {
            default_button: PointerButton::Left,
            after_move_delay: Duration::ZERO,
            press_release_delay: Duration::ZERO,
            after_input_delay: Duration::ZERO,
            after_click_delay: Duration::ZERO,
        }
    }
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            default_button: PointerButton::Left,
            after_move_delay: Duration::from_millis(40),
            press_release_delay: Duration::from_millis(50),
            after_input_delay: Duration::from_millis(35),
            after_click_delay: Duration::from_millis(80),
        }
    }
}

/// Trait that platform crates implement to drive pointer events.
pub trait PointerDevice: Send + Sync {
    fn position(&self) -> Result<Point, PlatformError>;
    fn move_to(&self, point: Point) -> Result<(), PlatformError>;
    fn press(&self, button: PointerButton) -> Result<(), PlatformError>;
    fn release(&self, button: PointerButton) -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformErrorKind;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPointerDevice {
        move_calls: AtomicUsize,
    }

    impl PointerDevice for StubPointerDevice {
        fn position(&self) -> Result<Point, PlatformError> {
            Ok(Point::new(0.0, 0.0))
        }

        fn move_to(&self, _point: Point) -> Result<(), PlatformError> {
            self.move_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn press(&self, _button: PointerButton) -> Result<(), PlatformError> {
            Err(PlatformError::new(PlatformErrorKind::CapabilityUnavailable, "press"))
        }

        fn release(&self, _button: PointerButton) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[rstest]
    fn pointer_device_is_object_safe() {
        let device: Box<dyn PointerDevice> =
            Box::new(StubPointerDevice { move_calls: AtomicUsize::new(0) });
        device.move_to(Point::new(1.0, 2.0)).unwrap();
        assert!(device.press(PointerButton::Left).is_err());
        assert!(device.release(PointerButton::Left).is_ok());
    }

    #[rstest]
    fn immediate_settings_have_no_delays() {
        let settings = PointerSettings::immediate();
        assert_eq!(settings.after_click_delay, Duration::ZERO);
        assert_eq!(settings.default_button, PointerButton::Left);
        assert!(PointerSettings::default().press_release_delay > Duration::ZERO);
    }
}
