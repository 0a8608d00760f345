use gallery_pilot_core::platform::{PlatformError, PointerButton, PointerDevice};
use gallery_pilot_core::types::Point;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

#[derive(Clone, Debug, PartialEq)]
pub enum PointerLogEntry {
    Move(Point),
    Press(PointerButton),
    Release(PointerButton),
}

struct PointerState {
    position: Point,
    log: Vec<PointerLogEntry>,
}

impl PointerState {
    const fn new() -> Self {
        Self { position: Point::new(0.0, 0.0), log: Vec::new() }
    }
}

/// Pointer device that records events instead of injecting them.
pub struct MockPointerDevice {
    state: Mutex<PointerState>,
}

impl MockPointerDevice {
    pub const fn new() -> Self {
        Self { state: Mutex::new(PointerState::new()) }
    }

    fn state(&self) -> MutexGuard<'_, PointerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears the recorded log and resets the cursor to the origin.
    pub fn reset(&self) {
        *self.state() = PointerState::new();
    }

    /// Returns the recorded log without clearing it.
    pub fn log(&self) -> Vec<PointerLogEntry> {
        self.state().log.clone()
    }

    /// Returns the recorded log since the last call and clears the buffer.
    pub fn take_log(&self) -> Vec<PointerLogEntry> {
        std::mem::take(&mut self.state().log)
    }

    /// Positions at which a press was issued, in order.
    pub fn click_points(&self) -> Vec<Point> {
        let mut position = Point::new(0.0, 0.0);
        let mut points = Vec::new();
        for entry in &self.state().log {
            match entry {
                PointerLogEntry::Move(point) => position = *point,
                PointerLogEntry::Press(_) => points.push(position),
                PointerLogEntry::Release(_) => {}
            }
        }
        points
    }
}

impl Default for MockPointerDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDevice for MockPointerDevice {
    fn position(&self) -> Result<Point, PlatformError> {
        Ok(self.state().position)
    }

    fn move_to(&self, point: Point) -> Result<(), PlatformError> {
        let mut state = self.state();
        state.position = point;
        state.log.push(PointerLogEntry::Move(point));
        trace!(x = point.x(), y = point.y(), "mock-pointer: move");
        Ok(())
    }

    fn press(&self, button: PointerButton) -> Result<(), PlatformError> {
        self.state().log.push(PointerLogEntry::Press(button));
        trace!(?button, "mock-pointer: press");
        Ok(())
    }

    fn release(&self, button: PointerButton) -> Result<(), PlatformError> {
        self.state().log.push(PointerLogEntry::Release(button));
        trace!(?button, "mock-pointer: release");
        Ok(())
    }
}
