//! In-memory mock platform for gallery emulator tests.
//!
//! Devices record every event instead of injecting input, so tests can assert on the exact
//! gesture sequence an emulator produced.

mod pointer;

pub use pointer::{MockPointerDevice, PointerLogEntry};

use gallery_pilot_core::platform::PointerDevice;
use std::sync::Arc;

/// Creates a fresh recording pointer with the cursor at the origin.
pub fn pointer_device() -> Arc<MockPointerDevice> {
    Arc::new(MockPointerDevice::new())
}

/// Same as [`pointer_device`], upcast for APIs that take a trait object.
pub fn dyn_pointer_device(device: &Arc<MockPointerDevice>) -> Arc<dyn PointerDevice> {
    Arc::clone(device) as Arc<dyn PointerDevice>
}
